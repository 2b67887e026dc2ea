use super::error::AssetError;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// A file on local disk together with the MIME type it is packaged as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalAsset {
    path: PathBuf,
    mime: String,
}

impl LocalAsset {
    pub fn new(path: impl Into<PathBuf>, mime: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime: mime.into(),
        }
    }

    /// Places `filename` inside `base_dir`, creating the directory if it is missing.
    ///
    /// `filename` must be a single plain path component.
    pub fn in_dir(
        base_dir: impl AsRef<Path>,
        filename: impl AsRef<Path>,
        mime: impl Into<String>,
    ) -> Result<Self, AssetError> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();

        let mut components = filename.components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(AssetError::Configuration {
                reason: format!(
                    "{} is not a plain file name inside {}",
                    filename.display(),
                    base_dir.display()
                ),
            });
        }

        std::fs::create_dir_all(base_dir).map_err(|source| AssetError::Io {
            path: base_dir.to_path_buf(),
            source,
        })?;

        if !base_dir.is_dir() {
            return Err(AssetError::Configuration {
                reason: format!("{} is not a directory", base_dir.display()),
            });
        }

        Ok(Self::new(base_dir.join(filename), mime))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// True only for a regular file; always hits the filesystem.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// A remote file and the local file it is materialised as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadableAsset {
    url: Url,
    local: LocalAsset,
}

impl DownloadableAsset {
    /// Resolves the local filename and MIME type of `url` without touching the network.
    ///
    /// A missing `filename` is taken from the last path segment of the URL, a missing
    /// `mime` is guessed from the filename (or the URL path) extension. `local_dir` is
    /// created if it does not exist yet.
    pub fn resolve(
        url: &str,
        local_dir: impl AsRef<Path>,
        filename: Option<&str>,
        mime: Option<&str>,
    ) -> Result<Self, AssetError> {
        let url = Url::parse(url).map_err(|e| AssetError::Configuration {
            reason: format!("invalid URL {url}: {e}"),
        })?;

        let filename = match filename.filter(|f| !f.is_empty()) {
            Some(filename) => filename.to_string(),
            None => filename_from_url(&url).ok_or_else(|| AssetError::Configuration {
                reason: format!("cannot derive a filename from {url}, specify it explicitly"),
            })?,
        };
        tracing::trace!(url = %url, filename = %filename, "Resolved asset filename");

        let mime = match mime.filter(|m| !m.is_empty()) {
            Some(mime) => mime.to_string(),
            None => mime_guess::from_path(&filename)
                .first_raw()
                .or_else(|| mime_guess::from_path(url.path()).first_raw())
                .map(str::to_string)
                .ok_or_else(|| AssetError::Configuration {
                    reason: format!("mime cannot be guessed from {url}, specify it explicitly"),
                })?,
        };

        Ok(Self {
            local: LocalAsset::in_dir(local_dir, &filename, mime)?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn local(&self) -> &LocalAsset {
        &self.local
    }

    pub fn path(&self) -> &Path {
        self.local.path()
    }

    /// File name of the local copy, as referenced from card templates.
    pub fn file_name(&self) -> Option<&str> {
        self.local.path().file_name().and_then(|name| name.to_str())
    }
}

impl fmt::Display for DownloadableAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.local.path().display())
    }
}

fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(str::to_string)
}

/// Terminal state of a single fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DownloadOutcome {
    Failed,
    UsedCached,
    Downloaded,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub failed: usize,
    pub used_cached: usize,
    pub downloaded: usize,
}

impl DownloadSummary {
    pub fn record(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Failed => self.failed += 1,
            DownloadOutcome::UsedCached => self.used_cached += 1,
            DownloadOutcome::Downloaded => self.downloaded += 1,
        }
    }

    pub fn count(&self, outcome: DownloadOutcome) -> usize {
        match outcome {
            DownloadOutcome::Failed => self.failed,
            DownloadOutcome::UsedCached => self.used_cached,
            DownloadOutcome::Downloaded => self.downloaded,
        }
    }

    pub fn total(&self) -> usize {
        self.failed + self.used_cached + self.downloaded
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cached/downloaded/failed assets: {}/{}/{}",
            self.used_cached, self.downloaded, self.failed
        )
    }
}

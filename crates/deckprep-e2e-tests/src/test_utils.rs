use eyre::Result;
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n fake image";

pub const RULES_BANK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bank>
  <questions>
    <question id="0">
      <text>What must you do at a flashing red light?</text>
      <image file="images/opkt/q1.png"/>
      <answers>
        <answer>Stop, then proceed when safe</answer>
        <distractor_1>Slow down</distractor_1>
        <distractor_2>Proceed without stopping</distractor_2>
      </answers>
      <chapter>5</chapter>
      <source>Learn to Drive Smart</source>
      <link src="https://example.com/ch5"/>
    </question>
    <question id="1">
      <text>When can you pass on the right?</text>
      <answers>
        <answer>When the vehicle ahead is turning left</answer>
        <distractor_1>Never</distractor_1>
      </answers>
      <chapter>5</chapter>
      <source/>
      <link src="https://example.com/ch5"/>
    </question>
    <question id="2">
      <text>What does a flashing red light mean at a crossing?</text>
      <image file="images/opkt/q1.png"/>
      <answers>
        <answer>Stop</answer>
        <distractor_1>Yield</distractor_1>
      </answers>
      <chapter>5</chapter>
      <source/>
      <link src="https://example.com/ch5"/>
    </question>
  </questions>
</bank>"#;

pub const SIGNS_BANK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bank>
  <questions>
    <question id="0">
      <text>What does this sign mean?</text>
      <image file="images/opkt/s1.png"/>
      <answers>
        <answer>School zone</answer>
        <distractor_1>Playground</distractor_1>
      </answers>
      <chapter>Signs</chapter>
      <source/>
      <link src="https://example.com/signs"/>
    </question>
  </questions>
</bank>"#;

/// Image paths referenced by [`RULES_BANK`] and [`SIGNS_BANK`].
pub const BANK_IMAGES: [&str; 2] = ["/images/opkt/q1.png", "/images/opkt/s1.png"];

/// Writes templates, question banks and a config file under `root`; returns the config path.
pub fn write_workspace(root: &Path, base_url: &str) -> Result<PathBuf> {
    let static_dir = root.join("static");
    std::fs::create_dir_all(&static_dir)?;
    std::fs::write(
        static_dir.join("front.html"),
        "<div class=\"question\">{{Question}}</div>{{Image}}",
    )?;
    std::fs::write(
        static_dir.join("back.html"),
        "{{FrontSide}}<hr id=\"answer\"><script>var answer = JSON.parse('{{Answer}}');</script>",
    )?;
    std::fs::write(static_dir.join("styles.css"), ".card { font-size: 20px; }")?;

    std::fs::write(root.join("rules.xml"), RULES_BANK)?;
    std::fs::write(root.join("signs.xml"), SIGNS_BANK)?;

    let config = format!(
        r#"base_url: {base_url}/
asset_dir: {root}/assets
output:
  path: {root}/practice-test.apkg
model:
  id: 1047592961
  name: Practice Test Model
  template_name: Practice Test
  templates:
    front: {root}/static/front.html
    back: {root}/static/back.html
    styles: {root}/static/styles.css
decks:
  - id: 1047658497
    name: Practice Test
    source: {root}/rules.xml
  - id: 1047658498
    name: Practice Test (Signs)
    source: {root}/signs.xml
    sort_id_base: 1000
"#,
        root = root.display(),
    );
    let config_path = root.join("config.yaml");
    std::fs::write(&config_path, config)?;

    Ok(config_path)
}

pub async fn mount_image(server: &MockServer, image_path: &str, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_bytes(PNG_BYTES.to_vec())
    } else {
        ResponseTemplate::new(status)
    };

    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("deckprep_lib=debug,deckprep_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

//! Integration tests for build configuration generation.

use std::fs;
use std::path::PathBuf;

use fluide::build::{
    generate, merge_config, resolve, run_build, BuildEngine, LogLevel, LogSink, ProjectOptions,
    RecordingLogSink, ServerSettings, BUILD_COMPLETE,
};
use fluide::error::Result;
use serde_json::{json, Value};
use tempfile::TempDir;

fn theme_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let entrypoints = temp.path().join("frontend/entrypoints");
    fs::create_dir_all(entrypoints.join("sections")).unwrap();
    fs::write(entrypoints.join("theme.ts"), "import './theme.css'").unwrap();
    fs::write(entrypoints.join("theme.css"), "body {}").unwrap();
    fs::write(entrypoints.join("sections/hero.ts"), "").unwrap();
    temp
}

#[test]
fn generates_from_options_file() {
    let temp = theme_project();
    fs::write(
        temp.path().join("fluide.config.yml"),
        r#"
snippet_name: vite-tag
overrides:
  server:
    host: 127.0.0.1
    port: 3000
    https: true
"#,
    )
    .unwrap();

    let options = ProjectOptions::load(temp.path()).unwrap();
    let config = generate(&options, &options.server());

    assert_eq!(config.origin(), "https://127.0.0.1:3000");
    assert_eq!(config.server.hmr.protocol, "wss");
    assert_eq!(
        config.entry_points(),
        [
            "frontend/entrypoints/sections/hero.ts",
            "frontend/entrypoints/theme.css",
            "frontend/entrypoints/theme.ts",
        ]
    );
    assert_eq!(
        config.server.watch.ignored,
        ["assets/*", "snippets/vite-tag.liquid"]
    );
}

#[test]
fn generation_is_repeatable() {
    let temp = theme_project();
    let options = ProjectOptions::load(temp.path()).unwrap();
    let server = ServerSettings::default();

    assert_eq!(generate(&options, &server), generate(&options, &server));
}

#[test]
fn overrides_win_over_generated_defaults() {
    let temp = theme_project();
    fs::write(
        temp.path().join("fluide.config.yml"),
        r#"
overrides:
  build:
    outDir: dist
    rollupOptions:
      input:
        - extra/entry.ts
  resolve:
    alias:
      "~": /custom
  plugins:
    - name: tailwind
"#,
    )
    .unwrap();

    let options = ProjectOptions::load(temp.path()).unwrap();
    let resolved = resolve(&options).unwrap();

    assert_eq!(resolved["build"]["outDir"], "dist");
    assert_eq!(resolved["build"]["manifest"], "fluide.manifest.json");
    assert_eq!(resolved["resolve"]["alias"]["~"], "/custom");
    assert_eq!(
        resolved["resolve"]["alias"]["@"],
        temp.path().join("frontend").to_string_lossy().as_ref()
    );
    let inputs = resolved["build"]["rollupOptions"]["input"].as_array().unwrap();
    assert_eq!(inputs.len(), 4);
    assert_eq!(inputs[3], "extra/entry.ts");
    assert_eq!(resolved["plugins"][0]["name"], "tailwind");
}

#[test]
fn custom_layout_paths() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/js")).unwrap();
    fs::write(temp.path().join("src/js/main.js"), "").unwrap();

    let mut options = ProjectOptions::in_dir(temp.path());
    options.root = PathBuf::from("theme");
    options.source_dir = PathBuf::from("src");
    options.entrypoints_dir = PathBuf::from("src/js");

    let config = generate(&options, &ServerSettings::default());

    assert_eq!(config.entry_points(), ["src/js/main.js"]);
    assert_eq!(
        config.build.out_dir,
        temp.path().join("theme/assets").to_string_lossy()
    );
    assert_eq!(
        config.resolve.alias["~"],
        temp.path().join("src").to_string_lossy()
    );
}

#[test]
fn merge_keeps_unrelated_defaults() {
    let defaults = json!({ "server": { "port": 5173, "strictPort": true } });
    let merged = merge_config(&defaults, &json!({ "server": { "port": 8080 } }));
    assert_eq!(merged, json!({ "server": { "port": 8080, "strictPort": true } }));
}

struct RecordingEngine;

impl BuildEngine for RecordingEngine {
    fn build(&self, config: &Value, sink: &mut dyn LogSink) -> Result<()> {
        sink.info(&format!("building {}", config["base"]));
        Ok(())
    }
}

#[test]
fn build_logs_completion() {
    let temp = theme_project();
    let options = ProjectOptions::load(temp.path()).unwrap();
    let config = resolve(&options).unwrap();
    let mut sink = RecordingLogSink::new();

    run_build(&RecordingEngine, &config, &mut sink).unwrap();

    assert_eq!(
        sink.messages(LogLevel::Info),
        vec!["building \"./\"", BUILD_COMPLETE]
    );
}

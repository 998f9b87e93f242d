//! Project fixture shared by command tests.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use packup::config::{CONFIG_FILE, PackConfig};

/// Write a small project under `dir` and load its config.
///
/// ```text
/// packup.toml
/// public/assets/css/{reset,site}.css
/// public/assets/img/logo.png
/// public/assets/js/app.js
/// public/dist/            (output)
/// ```
pub fn write_project(dir: &Path) -> PackConfig {
    let assets = dir.join("public/assets");
    let past = SystemTime::now() - Duration::from_secs(60);
    for (name, content) in [
        ("css/reset.css", "* { margin: 0 }"),
        ("css/site.css", "h1 { background: url(../img/logo.png) }"),
        ("img/logo.png", "png"),
        ("js/app.js", "console.log('hi')"),
    ] {
        let path = assets.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(past)
            .unwrap();
    }

    let path = dir.join(CONFIG_FILE);
    fs::write(
        &path,
        r#"
[build]
output = "public/dist"
public_root = "public"
assets = "public/assets"

[minify]
backend = "none"

[[bundle]]
kind = "css"
files = ["css/reset.css", "css/site.css"]

[[bundle]]
kind = "js"
files = ["js/app.js"]
"#,
    )
    .unwrap();

    PackConfig::load(&path).unwrap()
}

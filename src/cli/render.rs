//! `packup render`

use anyhow::{Result, bail};
use packup::asset::{bundle_href, inline_tag, link_tag};
use packup::config::PackConfig;
use packup::{Bundle, Bundler};

/// HTML tag for one bundle, building it first when stale.
pub fn render_tag(config: &PackConfig, name: &str, inline: bool) -> Result<String> {
    let bundle = select_one(config, name)?;
    let output = Bundler::from_config(config).quiet(true).build(&bundle);

    let kind = bundle.kind();
    Ok(if inline {
        inline_tag(kind, &output.code)
    } else {
        link_tag(kind, &bundle_href(&bundle.target, config.public_root()))
    })
}

/// Print the tag to stdout.
pub fn render_bundle(config: &PackConfig, name: &str, inline: bool) -> Result<()> {
    println!("{}", render_tag(config, name, inline)?);
    Ok(())
}

fn select_one(config: &PackConfig, name: &str) -> Result<Bundle> {
    let mut selected = config.select(&[name.to_string()])?;
    if selected.len() > 1 {
        let candidates: Vec<_> = selected.iter().map(|b| b.target.file_name()).collect();
        bail!(
            "`{}` is ambiguous, use one of: {}",
            name,
            candidates.join(", ")
        );
    }
    match selected.pop() {
        Some(bundle) => Ok(bundle),
        None => bail!("no bundle named `{}`", name),
    }
}

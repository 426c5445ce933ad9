use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};
use pom_version_bump::{
    arguments::Arguments,
    parsers::{Parser as VersionFileParser, pom_parser::PomParser},
};

fn main() -> Result<()> {
    let _args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    bump::<PomParser>()
}

fn bump<P: VersionFileParser>() -> Result<()> {
    let version_file = P::manifest_file_name();
    debug!("Reading version from '{}'", version_file);

    let (old_version, new_version) = P::next_version(version_file)?;
    println!(
        "Increment project version from {} to {}",
        old_version, new_version
    );

    P::replace_version(version_file, &old_version, &new_version)?;
    println!("Updated {} successfully", version_file);
    Ok(())
}

//! Copy the package's templates into the project and remove the package

use colored::*;
use eyre::{Context, Result};

use crate::config::Config;
use crate::install::{CopyOutcome, Installer, Removal};

const PREFIX: &str = "[GeneratorAgent]";

pub fn run(config: &Config) -> Result<()> {
    let target_root = std::env::current_dir().context("Failed to determine current directory")?;
    let installer = Installer::new(
        config.package_root(),
        target_root,
        &config.package.name,
        config.install.clone(),
    );

    println!("{} Installing to: {}", PREFIX.dimmed(), installer.target_root().display());
    println!("{} Package root: {}", PREFIX.dimmed(), installer.package_root().display());

    let report = installer.run();

    for (name, outcome) in &report.entries {
        match outcome {
            CopyOutcome::Copied(stats) if stats.failed == 0 => {
                println!("  {} Copied {} ({} file(s))", "✓".green(), name, stats.copied)
            }
            CopyOutcome::Copied(stats) => println!(
                "  {} Copied {} ({} file(s), {} failed)",
                "⚠".yellow(),
                name,
                stats.copied,
                stats.failed
            ),
            CopyOutcome::Missing => println!("  {} Skipped {} (not in package)", "-".dimmed(), name),
            CopyOutcome::SameLocation => {
                println!("  {} Skipped {} (already in place)", "-".dimmed(), name)
            }
            CopyOutcome::Failed(e) => println!("  {} Failed to copy {}: {}", "✗".red(), name, e),
        }
    }

    match &report.removal {
        Removal::Removed(path) => println!("  {} Removed {}", "✓".green(), path.display()),
        Removal::NotFound(_) => println!("  {} {} not found in node_modules", "-".dimmed(), config.package.name),
        Removal::Failed(path, e) => {
            println!("  {} Error removing {}: {}", "⚠".yellow(), path.display(), e)
        }
    }

    println!();
    if report.failures() == 0 {
        println!("{}", "✅ Copied files to project root.".green());
    } else {
        println!(
            "{} Finished with {} problem(s); already copied files were kept.",
            "⚠".yellow(),
            report.failures()
        );
    }

    Ok(())
}

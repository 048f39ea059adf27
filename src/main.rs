/*
 * aur-rpc - Typed client for the Arch User Repository RPC interface.
 * Copyright (C) 2025  compiledkernel-idk and pacboost contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use console::style;
use std::path::PathBuf;

use aur_rpc::aur::{AurClient, Package, PackageRef, ProtocolVersion};
use aur_rpc::{categories, logging, Config};

#[derive(Parser)]
#[command(name = "aur-rpc")]
#[command(version)]
#[command(about = "Query the Arch User Repository RPC interface.")]
struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Use the legacy payload format (no protocol version parameter)
    #[arg(long, global = true)]
    legacy: bool,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search package names and descriptions
    Search { term: String },
    /// List packages of a maintainer
    Msearch { maintainer: String },
    /// Show details of one package, by name or ID
    Info { package: String },
    /// Show several packages at once
    Multiinfo {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Translate a category ID to its name or a name to its ID
    Category { value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if cli.legacy {
        config.protocol_version = ProtocolVersion::Legacy;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init_from_config(&config.logging);

    let client = || AurClient::from_config(&config).context("invalid configuration");
    match cli.command {
        Command::Category { value } => show_category(&value)?,
        Command::Search { term } => {
            let results = client()?
                .search(&term)
                .with_context(|| format!("search for '{}' failed", term))?;
            print_packages(&term, results.collect_all()?);
        }
        Command::Msearch { maintainer } => {
            let results = client()?
                .msearch(&maintainer)
                .with_context(|| format!("maintainer search for '{}' failed", maintainer))?;
            print_packages(&maintainer, results.collect_all()?);
        }
        Command::Info { package } => {
            let pkg = client()?.info(parse_ref(&package))?;
            print_details(&pkg);
        }
        Command::Multiinfo { packages } => {
            let items: Vec<PackageRef> = packages.iter().map(|p| parse_ref(p)).collect();
            let found = client()?.multiinfo(&items)?;
            let mut pkgs: Vec<&Package> = found.values().collect();
            pkgs.sort_by(|a, b| a.name.cmp(&b.name));
            for pkg in pkgs {
                print_details(pkg);
            }
        }
    }
    Ok(())
}

/// All-digit arguments are package IDs
fn parse_ref(arg: &str) -> PackageRef {
    match arg.parse::<u64>() {
        Ok(id) => PackageRef::Id(id),
        Err(_) => PackageRef::Name(arg.to_string()),
    }
}

fn show_category(value: &str) -> Result<()> {
    match value.parse::<u32>() {
        Ok(id) => println!("{}", categories::category_id_to_name(id)?),
        Err(_) => println!("{}", categories::category_name_to_id(value)?),
    }
    Ok(())
}

fn print_packages(query: &str, pkgs: Vec<Package>) {
    if pkgs.is_empty() {
        println!("   No results found for '{}'", style(query).yellow());
        return;
    }

    println!(
        "{} {} result(s) for '{}':",
        style("::").cyan().bold(),
        style(pkgs.len()).white().bold(),
        style(query).yellow()
    );

    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(vec!["package", "version", "votes", "maintainer", "description"]);
    for pkg in &pkgs {
        let name = if pkg.out_of_date {
            format!("{} [out-of-date]", pkg.name)
        } else {
            pkg.name.clone()
        };
        t.add_row(vec![
            name,
            pkg.version.clone(),
            pkg.num_votes.to_string(),
            pkg.maintainer.clone().unwrap_or_else(|| "orphan".to_string()),
            pkg.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", t);
}

fn print_details(pkg: &Package) {
    let date = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let list = |l: &[String]| if l.is_empty() { "-".to_string() } else { l.join("  ") };

    println!(
        "{}/{} {}",
        style("aur").magenta().bold(),
        style(&pkg.name).white().bold(),
        style(&pkg.version).green()
    );
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.add_row(vec!["ID".to_string(), pkg.id.to_string()]);
    t.add_row(vec![
        "Package Base".to_string(),
        pkg.package_base.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    t.add_row(vec!["Description".to_string(), pkg.description.clone().unwrap_or_default()]);
    t.add_row(vec!["URL".to_string(), pkg.url.clone().unwrap_or_default()]);
    t.add_row(vec!["Licenses".to_string(), list(&pkg.license)]);
    if let Some(category) = pkg.category() {
        t.add_row(vec!["Category".to_string(), category.to_string()]);
    }
    t.add_row(vec!["Keywords".to_string(), list(&pkg.keywords)]);
    t.add_row(vec!["Depends On".to_string(), list(&pkg.depends)]);
    t.add_row(vec!["Make Deps".to_string(), list(&pkg.make_depends)]);
    t.add_row(vec!["Optional Deps".to_string(), list(&pkg.opt_depends)]);
    t.add_row(vec![
        "Maintainer".to_string(),
        pkg.maintainer.clone().unwrap_or_else(|| "orphan".to_string()),
    ]);
    t.add_row(vec!["Votes".to_string(), pkg.num_votes.to_string()]);
    if let Some(popularity) = pkg.popularity {
        t.add_row(vec!["Popularity".to_string(), format!("{:.2}", popularity)]);
    }
    t.add_row(vec![
        "Out Of Date".to_string(),
        if pkg.out_of_date { "Yes" } else { "No" }.to_string(),
    ]);
    t.add_row(vec!["First Submitted".to_string(), date(pkg.first_submitted)]);
    t.add_row(vec!["Last Modified".to_string(), date(pkg.last_modified)]);
    t.add_row(vec!["Snapshot".to_string(), pkg.snapshot_url()]);
    println!("{}", t);
}

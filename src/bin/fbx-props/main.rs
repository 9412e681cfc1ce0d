//! fbx-props CLI - Inspect FBX property tables from a JSON scene description.

use fbx_properties::prelude::*;
use std::env;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_DATE: &str = env!("FBXPROPS_BUILD_DATE");

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        "info" | "i" => match filtered_args.get(1) {
            Some(path) => cmd_info(path),
            None => usage_error("fbx-props info <scene.json>"),
        },
        "get" | "g" => match filtered_args[1..] {
            [path, object, property] => cmd_get(path, object, property),
            _ => usage_error("fbx-props get <scene.json> <object> <property>"),
        },
        "dump" | "d" => match filtered_args.get(1) {
            Some(path) => cmd_dump(path),
            None => usage_error("fbx-props dump <scene.json>"),
        },
        "unparsed" | "u" => match filtered_args[1..] {
            [path, object] => cmd_unparsed(path, object),
            _ => usage_error("fbx-props unparsed <scene.json> <object>"),
        },
        "version" | "--version" | "-V" => {
            println!("fbx-props {} ({})", VERSION, BUILD_DATE);
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn usage_error(usage: &str) -> ! {
    eprintln!("Error: missing arguments");
    eprintln!("Usage: {}", usage);
    std::process::exit(1);
}

fn print_help() {
    println!("fbx-props {} - Inspect FBX property tables", VERSION);
    println!();
    println!("Usage: fbx-props [options] <command> <scene.json> [args]");
    println!();
    println!("Commands:");
    println!("  i, info      <scene>                     Template and object summary");
    println!("  g, get       <scene> <object> <property> Resolve one property");
    println!("  d, dump      <scene>                     Resolve all properties of all objects");
    println!("  u, unparsed  <scene> <object>            Local properties not yet looked up");
    println!("  version                                  Show version");
    println!("  h, help                                  Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose  Debug output");
    println!("  -vv, --trace   Trace output (very verbose)");
    println!("  -q, --quiet    Errors only");
    println!();
    println!("RUST_LOG overrides the log level.");
}

fn cmd_info(path: &str) -> Result<()> {
    let scene = Scene::load(path)?;

    println!("Scene: {}", path);
    println!();
    println!("Templates ({}):", scene.templates().count());
    for (class, table) in scene.templates() {
        println!(
            "  {} - {} properties, depth {}",
            class,
            table.len(),
            table.template_depth()
        );
    }
    println!();
    println!("Objects ({}):", scene.objects().len());
    for obj in scene.objects() {
        println!(
            "  {} [{}] - {} local properties",
            obj.name(),
            obj.class().unwrap_or("-"),
            obj.properties().len()
        );
    }
    Ok(())
}

fn cmd_get(path: &str, object: &str, property: &str) -> Result<()> {
    let scene = Scene::load(path)?;
    let obj = scene.object(object)?;

    match obj.properties().get(property)? {
        Some(value) => println!("{} = {} ({})", property, value, value.kind()),
        None => println!("{}: not found", property),
    }
    Ok(())
}

fn cmd_dump(path: &str) -> Result<()> {
    let scene = Scene::load(path)?;

    for obj in scene.objects() {
        println!("{} [{}]", obj.name(), obj.class().unwrap_or("-"));
        for name in resolvable_names(obj.properties()) {
            let source = if obj.properties().contains_local(&name) {
                ""
            } else {
                " (template)"
            };
            match obj.properties().get(&name)? {
                Some(value) => println!("  {} = {}{}", name, value, source),
                None => println!("  {} = <no value>{}", name, source),
            }
        }
    }
    Ok(())
}

fn cmd_unparsed(path: &str, object: &str) -> Result<()> {
    let scene = Scene::load(path)?;
    let obj = scene.object(object)?;

    for (name, value) in obj.properties().unparsed_properties()? {
        println!("{} = {} ({})", name, value, value.kind());
    }
    Ok(())
}

/// Local names followed by template names not overridden locally.
fn resolvable_names(table: &PropertyTable) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut current = Some(table);
    while let Some(t) = current {
        for name in t.local_names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        current = t.template().map(Arc::as_ref);
    }
    names
}

use javamap_core::bridge::ReflectionBridge;
use javamap_core::{ClassMap, ClosureResolver, JavaMapError, MemoryBridge, Options};
use javamap_java::ClassFileBridge;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

pub struct ResolveArgs {
    pub config: PathBuf,
    pub output: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "TS")]
    ts_type: String,
    #[tabled(rename = "Ctors")]
    constructors: usize,
    #[tabled(rename = "Methods")]
    methods: usize,
    #[tabled(rename = "Groups")]
    groups: usize,
}

pub async fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::load(&args.config)?;
    options.validate()?;
    let output = args.output.or_else(|| options.output.clone());

    let started = Instant::now();
    let snapshot = args.snapshot;
    let task = tokio::task::spawn_blocking(move || match snapshot {
        Some(path) => resolve_with(&options, &mut MemoryBridge::load(&path)?),
        None => resolve_with(&options, &mut ClassFileBridge::from_options(&options)?),
    });
    let map = match args.timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| format!("resolution timed out after {}s", limit.as_secs()))???,
        None => task.await??,
    };
    info!(
        classes = map.len(),
        methods = map.method_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "resolution finished"
    );

    match output {
        Some(path) => {
            map.write_json(&path)?;
            println!("{}", summary_table(&map));
            println!(
                "{} classes, {} missing, written to {}",
                map.len(),
                map.missing.len(),
                path.display()
            );
        }
        None => println!("{}", map.to_json_pretty()?),
    }
    Ok(())
}

/// Seeds the resolver from `options` and drains it against `bridge`.
pub fn resolve_with<B: ReflectionBridge + ?Sized>(
    options: &Options,
    bridge: &mut B,
) -> Result<ClassMap, JavaMapError> {
    let whitelist = options.whitelist()?;
    let mut resolver = ClosureResolver::new(&whitelist);
    for seed in options.seed_names()? {
        resolver.add_seed(seed);
    }
    if options.expand_packages {
        resolver.seed_packages(bridge)?;
    }
    resolver.resolve(bridge)
}

pub fn summary_table(map: &ClassMap) -> String {
    let rows: Vec<ClassRow> = map
        .iter()
        .map(|(name, entry)| ClassRow {
            name: name.to_string(),
            kind: if entry.is_interface {
                "interface"
            } else if entry.is_enum {
                "enum"
            } else {
                "class"
            },
            ts_type: entry.ts_type.clone(),
            constructors: entry.constructors.len(),
            methods: entry.methods.len(),
            groups: entry.variants.values().map(Vec::len).sum(),
        })
        .collect();
    Table::new(rows).with(Style::psql()).to_string()
}

use javamap_core::model::ClassName;
use javamap_core::{Options, Whitelist};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Debug, PartialEq)]
pub struct CheckRow {
    #[tabled(rename = "Class")]
    pub name: String,
    #[tabled(rename = "Whitelisted")]
    pub whitelisted: bool,
    #[tabled(rename = "Path")]
    pub fixed_path: String,
    #[tabled(rename = "Alias")]
    pub alias: String,
}

pub fn run(config: &Path, names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::load(config)?;
    options.validate()?;
    let whitelist = options.whitelist()?;
    let rows = check_names(&whitelist, names);
    println!("{}", Table::new(&rows).with(Style::psql()));
    Ok(())
}

pub fn check_names(whitelist: &Whitelist, names: &[String]) -> Vec<CheckRow> {
    names
        .iter()
        .map(|raw| {
            let name = ClassName::new(raw.trim());
            CheckRow {
                whitelisted: whitelist.in_white_list(name.as_str()),
                fixed_path: name.fix_class_path(),
                alias: name.alias(),
                name: name.to_string(),
            }
        })
        .collect()
}

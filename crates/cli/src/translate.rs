use javamap_core::{Options, ParamContext, TypeTranslator, Whitelist};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Debug, PartialEq)]
pub struct TranslateRow {
    #[tabled(rename = "Descriptor")]
    pub descriptor: String,
    #[tabled(rename = "TypeScript")]
    pub translated: String,
    #[tabled(skip)]
    pub failed: bool,
}

pub fn run(
    config: Option<&Path>,
    descriptors: &[String],
    return_context: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let whitelist = match config {
        Some(path) => Options::load(path)?.whitelist()?,
        None => Whitelist::default(),
    };
    let ctx = if return_context {
        ParamContext::Return
    } else {
        ParamContext::Parameter
    };
    let rows = translate_all(&whitelist, descriptors, ctx);
    println!("{}", Table::new(&rows).with(Style::psql()));
    let failed = rows.iter().filter(|r| r.failed).count();
    if failed > 0 {
        return Err(format!("{failed} of {} descriptors could not be translated", rows.len()).into());
    }
    Ok(())
}

/// One row per descriptor; untranslatable ones carry the error text.
pub fn translate_all(whitelist: &Whitelist, descriptors: &[String], ctx: ParamContext) -> Vec<TranslateRow> {
    let translator = TypeTranslator::new(whitelist);
    descriptors
        .iter()
        .map(|descriptor| match translator.translate(descriptor, ctx) {
            Ok(ty) => TranslateRow {
                descriptor: descriptor.clone(),
                translated: ty.to_string(),
                failed: false,
            },
            Err(e) => TranslateRow {
                descriptor: descriptor.clone(),
                translated: format!("error: {e}"),
                failed: true,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn translates_in_both_contexts() {
        let whitelist = Whitelist::parse(["java.util.function.*"]).unwrap();
        let descriptors = strings(&["long", "[I", "Ljava.util.function.Function;"]);

        let params: Vec<String> = translate_all(&whitelist, &descriptors, ParamContext::Parameter)
            .into_iter()
            .map(|r| r.translated)
            .collect();
        assert_eq!(params, vec!["long_t", "array_t<integer_t>", "Function"]);

        let returns: Vec<String> = translate_all(&whitelist, &descriptors, ParamContext::Return)
            .into_iter()
            .map(|r| r.translated)
            .collect();
        assert_eq!(returns, vec!["longValue_t", "number[]", "Function"]);
    }

    #[test]
    fn bad_descriptors_are_reported_inline() {
        let rows = translate_all(
            &Whitelist::default(),
            &strings(&["int", "[Q"]),
            ParamContext::Parameter,
        );
        assert!(!rows[0].failed);
        assert!(rows[1].failed);
        assert!(rows[1].translated.starts_with("error: "));
    }

    #[test]
    fn any_failed_descriptor_fails_the_command() {
        assert!(run(None, &strings(&["int", "java.lang.String"]), false).is_ok());
        let err = run(None, &strings(&["int", "[Q"]), true).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 descriptors could not be translated");
    }
}

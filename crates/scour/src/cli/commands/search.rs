//! Implementation of `scour search`.

use std::process::ExitCode;

use scour_search::{
    CursorArg, IndexItemResolver, RequestContext, SearchArgs, SearchError, SearchTranslator,
};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{print_json, print_page},
};

/// Translates the command's arguments into a search and prints the result page.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let args = match build_args(cmd) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: --args: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?args, "search arguments");

    let registry = match ctx.registry() {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let request_context = RequestContext::from_config(&ctx.config);
    let index = request_context.index_name(&args, &ctx.config);
    let resolver = IndexItemResolver::new(&registry, index);
    let translator = SearchTranslator::new(&registry, &resolver, &ctx.config);

    let page = match translator.search(&args, &request_context) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&page);
    }
    print_page(&page);
    ExitCode::SUCCESS
}

/// Builds the argument bag: `--args` first, then the individual flags on top.
///
/// Scalar flags replace values from `--args`; `--field` and `--facet` append to its lists.
fn build_args(cmd: &SearchCommand) -> Result<SearchArgs, SearchError> {
    let mut args = match &cmd.args {
        Some(json) => SearchArgs::from_json(json)?,
        None => SearchArgs::default(),
    };

    override_with(&mut args.root_item, cmd.root.as_deref());
    override_with(&mut args.keyword, cmd.keyword.as_deref());
    override_with(&mut args.language, cmd.language.as_deref());
    override_with(&mut args.index, cmd.index.as_deref());
    if cmd.all_versions {
        args.latest_version = Some(false);
    }

    for field in &cmd.fields {
        match field.split_once('=') {
            Some((name, value)) => args.push_field(name, Some(value)),
            None => args.push_field(field, None),
        }
    }
    args.facet_on.extend(cmd.facets.iter().cloned());

    override_cursor(&mut args.first, cmd.first.as_deref());
    override_cursor(&mut args.last, cmd.last.as_deref());
    override_cursor(&mut args.before, cmd.before.as_deref());
    override_cursor(&mut args.after, cmd.after.as_deref());

    Ok(args)
}

/// Replaces a bag value with a flag value when the flag is given.
fn override_with(slot: &mut Option<String>, flag: Option<&str>) {
    if let Some(value) = flag {
        *slot = Some(value.to_string());
    }
}

/// Replaces a paging argument with a flag value when the flag is given.
fn override_cursor(slot: &mut Option<CursorArg>, flag: Option<&str>) {
    if let Some(value) = flag {
        *slot = Some(CursorArg::Text(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flags_build_the_bag() {
        let cmd = SearchCommand {
            keyword: Some("bicycle".to_string()),
            all_versions: true,
            fields: vec!["category=sports".to_string(), "title=a=b".to_string()],
            facets: vec!["color".to_string()],
            first: Some("10".to_string()),
            ..SearchCommand::default()
        };
        let args = build_args(&cmd).unwrap();

        assert_eq!(args.keyword.as_deref(), Some("bicycle"));
        assert_eq!(args.latest_version, Some(false));
        assert_eq!(
            args.fields_equal,
            vec![
                json!({"name": "category", "value": "sports"}),
                json!({"name": "title", "value": "a=b"}),
            ]
        );
        assert_eq!(args.facet_on, vec!["color"]);
        assert_eq!(args.first, Some(CursorArg::Text("10".to_string())));
    }

    #[test]
    fn field_without_value_leaves_value_out() {
        let cmd = SearchCommand {
            fields: vec!["category".to_string()],
            ..SearchCommand::default()
        };
        let args = build_args(&cmd).unwrap();
        assert_eq!(args.fields_equal, vec![json!({"name": "category"})]);
    }

    #[test]
    fn flags_override_raw_args() {
        let cmd = SearchCommand {
            args: Some(
                r#"{"keyword": "helmet", "facetOn": "color", "first": 5, "language": "da"}"#
                    .to_string(),
            ),
            keyword: Some("bicycle".to_string()),
            facets: vec!["category".to_string()],
            ..SearchCommand::default()
        };
        let args = build_args(&cmd).unwrap();

        assert_eq!(args.keyword.as_deref(), Some("bicycle"));
        assert_eq!(args.language.as_deref(), Some("da"));
        assert_eq!(args.facet_on, vec!["color", "category"]);
        assert_eq!(args.first, Some(CursorArg::from(5)));
    }

    #[test]
    fn unknown_raw_argument_is_rejected() {
        let cmd = SearchCommand {
            args: Some(r#"{"version": true}"#.to_string()),
            ..SearchCommand::default()
        };
        assert!(matches!(
            build_args(&cmd).unwrap_err(),
            SearchError::InvalidArgs(_)
        ));
    }
}

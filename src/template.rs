//! Template rendering for generated pod files.
//!
//! Variables are written as `@VARIABLE_NAME@` in the template text. Rendering
//! is strict: the set of variables in the template must equal the set of
//! substitution keys, and any difference fails the render without writing
//! output.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AssembleError, Result};

static TEMPLATE_VAR_RE: Lazy<Regex> = regex_static::lazy_regex!(r"@(\w+)@");

/// Render template text with the given substitutions.
pub fn render(content: &str, substitutions: &IndexMap<String, String>) -> Result<String> {
    let mut seen = BTreeSet::new();

    let rendered = TEMPLATE_VAR_RE.replace_all(content, |caps: &regex::Captures| {
        let name = &caps[1];
        seen.insert(name.to_string());
        match substitutions.get(name) {
            Some(value) => value.clone(),
            // Leave the token in place; the mismatch check below reports it.
            None => caps[0].to_string(),
        }
    });

    let only_in_template = seen
        .iter()
        .filter(|name| !substitutions.contains_key(*name))
        .cloned()
        .collect::<Vec<_>>();
    let mut only_in_substitutions = substitutions
        .keys()
        .filter(|key| !seen.contains(*key))
        .cloned()
        .collect::<Vec<_>>();
    only_in_substitutions.sort();

    if !only_in_template.is_empty() || !only_in_substitutions.is_empty() {
        return Err(AssembleError::TemplateMismatch {
            only_in_template,
            only_in_substitutions,
        });
    }

    Ok(rendered.into_owned())
}

/// Render `template_file` and write the result to `output_file`.
pub fn gen_file_from_template(
    template_file: &Path,
    output_file: &Path,
    substitutions: &IndexMap<String, String>,
) -> Result<()> {
    let content = fs::read_to_string(template_file).map_err(|source| {
        AssembleError::PathNotFound {
            path: template_file.to_path_buf(),
            source,
        }
    })?;
    let rendered = render(&content, substitutions)?;
    fs::write(output_file, rendered)?;
    Ok(())
}

//! Post-install caveats rendering

use crate::manifest::Manifest;

/// Used when a manifest declares no caveats of its own
pub const DEFAULT_TEMPLATE: &str = "You have installed {{name}}.
To run it, execute the following command:
    {{target}}
";

/// Render a caveats template.
///
/// `{{target}}` is replaced with the install target name and `{{name}}`
/// with the manifest name. Unknown placeholders are left as they are.
pub fn render(template: &str, name: &str, target: &str) -> String {
    let mut out = String::with_capacity(template.len() + target.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let substituted = after.find("}}").and_then(|end| {
            let value = match after[..end].trim() {
                "target" => target,
                "name" => name,
                _ => return None,
            };
            Some((value, &after[end + 2..]))
        });

        match substituted {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Caveats for `manifest`, falling back to [`DEFAULT_TEMPLATE`]
pub fn render_caveats(manifest: &Manifest) -> String {
    let template = manifest
        .caveats_template
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TEMPLATE);

    render(template, &manifest.name, &manifest.install_target_name)
}

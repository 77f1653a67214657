//! Command templating
//!
//! Renders a method's command-line template by substituting the
//! configuration values for the recognized `{name}` tokens. Tokens
//! outside the recognized set are left verbatim so vendor templates may
//! carry unrelated literal braces.

use crate::config::BenchConfig;

/// Render `template` against the current configuration.
///
/// Recognized tokens: `{n}`, `{block}`, `{p}`, `{q}`, `{iters}` and the
/// derived `{np}` (always `p * q`, never independently settable).
pub fn render(template: &str, config: &BenchConfig) -> String {
    let np = u64::from(config.p) * u64::from(config.q);
    template
        .replace("{n}", &config.n.to_string())
        .replace("{block}", &config.block.to_string())
        .replace("{p}", &config.p.to_string())
        .replace("{q}", &config.q.to_string())
        .replace("{iters}", &config.iters.to_string())
        .replace("{np}", &np.to_string())
}

//! HTML rendering of a [`ReportContext`].

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError, TemplateError,
};
use report::ReportContext;

const REPORT_TEMPLATE: &str = "report";
const PLACEHOLDER: &str = "-";

/// Handlebars registry holding the embedded report template.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("decimal", Box::new(decimal_helper));
        handlebars.register_helper("delta_t", Box::new(delta_t_helper));
        handlebars.register_template_string(
            REPORT_TEMPLATE,
            include_str!("../templates/report.hbs"),
        )?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, context: &ReportContext) -> Result<String, RenderError> {
        self.handlebars.render(REPORT_TEMPLATE, context)
    }
}

/// Formats a numeric value with a fixed number of decimals, using a decimal
/// comma: `{{decimal value 1}}`. Non-numbers render as `-`.
fn decimal_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let digits = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(1) as usize;
    match h.param(0).and_then(|v| v.value().as_f64()) {
        Some(value) => out.write(&format_decimal(value, digits))?,
        None => out.write(PLACEHOLDER)?,
    }
    Ok(())
}

/// `{{delta_t temperature humidity}}`
fn delta_t_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let temperature = h.param(0).and_then(|v| v.value().as_f64());
    let humidity = h.param(1).and_then(|v| v.value().as_f64());
    match temperature.zip(humidity) {
        Some((t, rh)) => out.write(&format_decimal(report::delta_t(t, rh), 1))?,
        None => out.write(PLACEHOLDER)?,
    }
    Ok(())
}

fn format_decimal(value: f64, digits: usize) -> String {
    format!("{value:.digits$}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decimals_use_comma() {
        assert_eq!(format_decimal(28.0, 1), "28,0");
        assert_eq!(format_decimal(8.456, 2), "8,46");
        assert_eq!(format_decimal(3.0, 0), "3");
    }

    #[test]
    fn helpers_render_placeholders_for_missing_values() {
        let mut hb = Handlebars::new();
        hb.register_helper("decimal", Box::new(decimal_helper));
        hb.register_helper("delta_t", Box::new(delta_t_helper));

        let out = hb
            .render_template(
                "{{decimal t}}|{{decimal missing}}|{{delta_t t rh}}|{{delta_t t missing}}",
                &json!({"t": 20.0, "rh": 50.0}),
            )
            .unwrap();
        assert_eq!(out, "20,0|-|6,3|-");
    }

    #[test]
    fn embedded_template_compiles() {
        assert!(ReportRenderer::new().is_ok());
    }
}

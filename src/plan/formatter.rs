use super::ConversionPlan;
use itertools::Itertools;

/// Formats conversion plans into human-readable strings
pub struct PlanFormatter;

impl PlanFormatter {
    /// Every step with its handler: `origin(image/svg+xml) -> H1(image/png)`.
    pub fn format_plan(plan: &ConversionPlan) -> String {
        plan.steps()
            .iter()
            .map(|step| format!("{}({})", step.handler, step.format.mime))
            .join(" -> ")
    }

    /// Only the formats: `image/svg+xml → image/png → image/jpeg`.
    pub fn format_mimes(plan: &ConversionPlan) -> String {
        plan.steps().iter().map(|step| step.mime()).join(" → ")
    }

    /// Short extension chain such as `svg → png → jpg`, falling back to the MIME type.
    pub fn format_extensions(plan: &ConversionPlan) -> String {
        plan.steps()
            .iter()
            .map(|step| {
                if step.format.extension.is_empty() {
                    step.format.mime.as_str()
                } else {
                    step.format.extension.as_str()
                }
            })
            .join(" → ")
    }

    /// Formats a cost for display, dropping a zero fraction.
    pub fn format_cost(cost: f64) -> String {
        if cost.fract() == 0.0 {
            format!("{}", cost as i64)
        } else {
            format!("{:.3}", cost)
        }
    }
}

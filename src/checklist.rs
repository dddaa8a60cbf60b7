//! Human-readable checklist of the rules, generated from a threshold set.

use serde::{Deserialize, Serialize};

use crate::thresholds::ThresholdSet;
use crate::types::ButtonPriority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub categories: Vec<ChecklistCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    pub name: String,
    pub rules: Vec<ChecklistRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistRule {
    pub description: String,
    /// Set for device-dependent rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<f64>,
}

impl ChecklistRule {
    fn plain(description: String) -> Self {
        Self {
            description,
            desktop: None,
            mobile: None,
        }
    }

    fn per_device(description: String, desktop: f64, mobile: f64) -> Self {
        Self {
            description,
            desktop: Some(desktop),
            mobile: Some(mobile),
        }
    }
}

fn category(name: &str, rules: Vec<ChecklistRule>) -> ChecklistCategory {
    ChecklistCategory {
        name: name.to_string(),
        rules,
    }
}

pub fn checklist(t: &ThresholdSet) -> Checklist {
    let button_rules = ButtonPriority::all()
        .into_iter()
        .map(|p| {
            let min = *t.button_min_height.get(p);
            ChecklistRule::per_device(
                format!("{} priority buttons at least {min}px tall", p.label()),
                min,
                min,
            )
        })
        .collect();

    let spacing_rules = ButtonPriority::all()
        .into_iter()
        .map(|p| {
            let range = t.button_spacing.get(p);
            ChecklistRule::plain(format!(
                "{} priority buttons spaced {}–{}px apart",
                p.label(),
                range.min,
                range.max
            ))
        })
        .collect();

    Checklist {
        categories: vec![
            category("Button Size", button_rules),
            category("Spacing", spacing_rules),
            category(
                "Text Readability",
                vec![ChecklistRule::per_device(
                    format!(
                        "Minimum font size {}px desktop, {}px mobile",
                        t.font_min.desktop, t.font_min.mobile
                    ),
                    t.font_min.desktop,
                    t.font_min.mobile,
                )],
            ),
            category(
                "Color Contrast",
                vec![
                    ChecklistRule::plain(format!(
                        "WCAG AA contrast ratio {}:1 or higher for normal text",
                        t.contrast.normal_min
                    )),
                    ChecklistRule::plain(format!(
                        "At least {}:1 for large text",
                        t.contrast.large_min
                    )),
                ],
            ),
            category(
                "Touch Targets",
                vec![
                    ChecklistRule {
                        description: format!(
                            "Controls at least {}px on their shorter side (mobile)",
                            t.touch.control_min
                        ),
                        desktop: None,
                        mobile: Some(t.touch.control_min),
                    },
                    ChecklistRule {
                        description: format!(
                            "Tappable text at least {}px on its shorter side (mobile)",
                            t.touch.text_min
                        ),
                        desktop: None,
                        mobile: Some(t.touch.text_min),
                    },
                ],
            ),
            category(
                "Layout Structure",
                vec![
                    ChecklistRule::plain(format!(
                        "Avoid nesting deeper than {} levels on average",
                        t.max_layout_depth
                    )),
                    ChecklistRule::plain("Ensure clean visual hierarchy".to_string()),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checklist_reflects_default_thresholds() {
        let list = checklist(&ThresholdSet::default());
        let names: Vec<_> = list.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Button Size",
                "Spacing",
                "Text Readability",
                "Color Contrast",
                "Touch Targets",
                "Layout Structure"
            ]
        );

        let buttons = &list.categories[0].rules;
        assert_eq!(buttons[0].description, "High priority buttons at least 72px tall");
        assert_eq!(buttons[2].desktop, Some(48.0));

        assert_eq!(
            list.categories[1].rules[1].description,
            "Medium priority buttons spaced 24–40px apart"
        );
        let text = &list.categories[2].rules[0];
        assert_eq!(text.desktop, Some(14.0));
        assert_eq!(text.mobile, Some(16.0));
        assert!(list.categories[3].rules[0].description.contains("4.5:1"));
        assert!(list.categories[5].rules[0].description.contains("deeper than 5"));
    }

    #[test]
    fn checklist_follows_overrides() {
        let mut t = ThresholdSet::default();
        t.max_layout_depth = 3.0;
        t.font_min.mobile = 18.0;
        let list = checklist(&t);
        assert_eq!(list.categories[2].rules[0].mobile, Some(18.0));
        assert!(list.categories[5].rules[0].description.contains("deeper than 3"));
    }

    #[test]
    fn device_values_are_omitted_when_absent() {
        let list = checklist(&ThresholdSet::default());
        let json = serde_json::to_value(&list.categories[1].rules[0]).expect("serialize");
        assert!(json.get("desktop").is_none());
        assert!(json.get("mobile").is_none());
    }
}

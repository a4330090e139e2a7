use super::types::{Priority, Recommendation};
use crate::syntax::{ExampleValue, SyntaxDefinition};

/// One best-practice item: recommended when none of `satisfied_by` is set
pub struct Check {
    pub option: &'static str,
    pub satisfied_by: &'static [&'static str],
    pub priority: Priority,
    pub title: &'static str,
    pub message: &'static str,
    pub example: ExampleValue,
}

pub const CHECKLIST: &[Check] = &[
    Check {
        option: "environment",
        satisfied_by: &["environment"],
        priority: Priority::High,
        title: "Set the environment",
        message: "Without an environment, events from production, staging and local runs are mixed together",
        example: ExampleValue::Str("production"),
    },
    Check {
        option: "release",
        satisfied_by: &["release"],
        priority: Priority::High,
        title: "Set the release",
        message: "A release links errors to deploys and enables regression and suspect commit detection",
        example: ExampleValue::Str("my-app@1.0.0"),
    },
    Check {
        option: "tracesSampleRate",
        satisfied_by: &["tracesSampleRate", "enableTracing", "tracesSampler"],
        priority: Priority::Medium,
        title: "Enable performance monitoring",
        message: "No traces sample rate is configured, so no transactions are collected",
        example: ExampleValue::Number(0.2),
    },
    Check {
        option: "beforeSend",
        satisfied_by: &["beforeSend"],
        priority: Priority::Medium,
        title: "Add a beforeSend hook",
        message: "A beforeSend hook lets you scrub sensitive data and drop events before they leave the app",
        example: ExampleValue::Callback,
    },
    Check {
        option: "ignoreErrors",
        satisfied_by: &["ignoreErrors"],
        priority: Priority::Low,
        title: "Filter known noise",
        message: "An ignore list keeps expected errors from using up your quota",
        example: ExampleValue::StrList(&["NetworkError"]),
    },
];

impl Check {
    pub fn recommend(&self, syntax: Option<&dyn SyntaxDefinition>) -> Recommendation {
        Recommendation {
            priority: self.priority,
            option: self.option.to_string(),
            title: self.title.to_string(),
            message: self.message.to_string(),
            example: syntax.map(|s| s.render_example(self.option, &self.example)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxId, SyntaxRegistry};

    fn check(option: &str) -> &'static Check {
        CHECKLIST.iter().find(|c| c.option == option).unwrap()
    }

    #[test]
    fn test_examples_follow_target_conventions() {
        let registry = SyntaxRegistry::with_defaults();
        let example = |id: SyntaxId, option: &str| {
            check(option).recommend(registry.get(id)).example.unwrap()
        };

        assert_eq!(example(SyntaxId::JavaScript, "tracesSampleRate"), "tracesSampleRate: 0.2,");
        assert_eq!(example(SyntaxId::Python, "tracesSampleRate"), "traces_sample_rate=0.2,");
        assert!(example(SyntaxId::Go, "environment").starts_with("Environment:"));
        assert!(example(SyntaxId::Ruby, "environment").starts_with("config.environment ="));
        assert!(example(SyntaxId::Java, "release").starts_with("options.setRelease("));
    }

    #[test]
    fn test_unknown_syntax_has_no_example() {
        let rec = check("release").recommend(None);
        assert_eq!(rec.priority, Priority::High);
        assert!(rec.example.is_none());
    }
}

//! Built-in Sentry option table

use super::types::{DictionaryOption, OptionCategory as C, OptionType as T};
use crate::syntax::SyntaxId;

const MOBILE: &[SyntaxId] = &[
    SyntaxId::Java,
    SyntaxId::Kotlin,
    SyntaxId::Cocoa,
    SyntaxId::Dart,
    SyntaxId::DotNet,
];

pub fn entries() -> Vec<DictionaryOption> {
    vec![
        // Core
        DictionaryOption::new("dsn", "DSN", C::Core, T::String, "Data Source Name that tells the SDK where to send events")
            .required()
            .example("https://examplePublicKey@o0.ingest.sentry.io/0")
            .guidance("Load the DSN from an environment variable instead of committing it"),
        DictionaryOption::new("environment", "Environment", C::Core, T::String, "Environment name attached to every event, such as production or staging")
            .default_value("production")
            .example("production")
            .guidance("Set it so issues and alerts can be filtered per deployment")
            .alias("environmentName"),
        DictionaryOption::new("release", "Release", C::Core, T::String, "Release version used to link errors to deploys and source maps")
            .example("my-app@1.0.0")
            .guidance("Use the same value your deploy tooling reports so suspect commits and regressions work")
            .related(&["dist", "environment"])
            .alias("releaseName"),
        DictionaryOption::new("dist", "Distribution", C::Core, T::String, "Build or distribution identifier within a release")
            .related(&["release"]),
        DictionaryOption::new("serverName", "Server Name", C::Core, T::String, "Host name reported with events"),
        DictionaryOption::new("enabled", "Enabled", C::Core, T::Boolean, "Turns event sending on or off entirely")
            .default_value("true"),
        // Sampling
        DictionaryOption::new("sampleRate", "Error Sample Rate", C::Sampling, T::Number, "Fraction of error events to send, from 0.0 to 1.0")
            .default_value("1.0"),
        DictionaryOption::new("tracesSampleRate", "Traces Sample Rate", C::Sampling, T::Number, "Fraction of transactions to send for performance monitoring")
            .example("0.2")
            .guidance("Start between 0.1 and 0.2 in production and tune with quota usage")
            .warning("Every sampled transaction counts against your performance quota")
            .related(&["tracesSampler", "enableTracing"]),
        DictionaryOption::new("tracesSampler", "Traces Sampler", C::Sampling, T::Callback, "Function deciding the sample rate per transaction")
            .related(&["tracesSampleRate"]),
        DictionaryOption::new("profilesSampleRate", "Profiles Sample Rate", C::Profiling, T::Number, "Fraction of sampled transactions that are also profiled")
            .related(&["tracesSampleRate"]),
        DictionaryOption::new("replaysSessionSampleRate", "Replay Session Sample Rate", C::Replay, T::Number, "Fraction of all sessions recorded with Session Replay")
            .warning("Replays capture DOM content; review masking settings before raising this")
            .only_for(&[SyntaxId::JavaScript])
            .related(&["replaysOnErrorSampleRate"]),
        DictionaryOption::new("replaysOnErrorSampleRate", "Replay On-Error Sample Rate", C::Replay, T::Number, "Fraction of sessions recorded when an error occurs")
            .only_for(&[SyntaxId::JavaScript])
            .related(&["replaysSessionSampleRate"]),
        // Tracing
        DictionaryOption::new("enableTracing", "Enable Tracing", C::Tracing, T::Boolean, "Enables performance monitoring with the default sample rate")
            .related(&["tracesSampleRate"]),
        DictionaryOption::new("tracePropagationTargets", "Trace Propagation Targets", C::Tracing, T::Array, "URLs that receive distributed tracing headers")
            .warning("Overly broad targets leak tracing headers to third-party hosts"),
        // Privacy
        DictionaryOption::new("sendDefaultPii", "Send Default PII", C::Privacy, T::Boolean, "Attach personally identifiable information such as IP addresses, cookies and user ids")
            .default_value("false")
            .warning("Sends personally identifiable information to Sentry; confirm this is covered by your privacy policy")
            .alias("isSendDefaultPii"),
        DictionaryOption::new("maxRequestBodySize", "Max Request Body Size", C::Privacy, T::String, "How much of HTTP request bodies is captured")
            .warning("Request bodies may contain credentials or personal data"),
        // Hooks
        DictionaryOption::new("beforeSend", "Before Send", C::Hooks, T::Callback, "Hook that can modify or drop error events before they are sent")
            .guidance("Use it to scrub sensitive data or drop noisy events"),
        DictionaryOption::new("beforeSendTransaction", "Before Send Transaction", C::Hooks, T::Callback, "Hook that can modify or drop transactions before they are sent"),
        DictionaryOption::new("beforeBreadcrumb", "Before Breadcrumb", C::Hooks, T::Callback, "Hook that can modify or drop breadcrumbs"),
        // Filtering
        DictionaryOption::new("ignoreErrors", "Ignore Errors", C::Filtering, T::Array, "Error messages or exception types that are never reported")
            .guidance("Filter known noise at the source to save quota")
            .alias("excludedExceptions")
            .alias("ignoredErrors"),
        DictionaryOption::new("ignoreTransactions", "Ignore Transactions", C::Filtering, T::Array, "Transaction names that are never reported"),
        DictionaryOption::new("denyUrls", "Deny URLs", C::Filtering, T::Array, "Script URLs whose errors are dropped")
            .only_for(&[SyntaxId::JavaScript]),
        DictionaryOption::new("allowUrls", "Allow URLs", C::Filtering, T::Array, "Only errors from these script URLs are reported")
            .only_for(&[SyntaxId::JavaScript]),
        DictionaryOption::new("inAppInclude", "In-App Include", C::Filtering, T::Array, "Module prefixes treated as application code in stack traces"),
        DictionaryOption::new("inAppExclude", "In-App Exclude", C::Filtering, T::Array, "Module prefixes treated as library code in stack traces"),
        // Integrations
        DictionaryOption::new("integrations", "Integrations", C::Integrations, T::Array, "Additional or customized SDK integrations"),
        DictionaryOption::new("defaultIntegrations", "Default Integrations", C::Integrations, T::Boolean, "Whether the SDK installs its default integrations"),
        DictionaryOption::new("breadcrumbsLogger", "Breadcrumbs Logger", C::Integrations, T::Array, "Sources that record breadcrumbs automatically")
            .only_for(&[SyntaxId::Ruby]),
        // Transport
        DictionaryOption::new("transport", "Transport", C::Transport, T::Object, "Custom transport used to deliver events"),
        DictionaryOption::new("httpProxy", "HTTP Proxy", C::Transport, T::String, "Proxy used for outgoing HTTP requests"),
        DictionaryOption::new("httpsProxy", "HTTPS Proxy", C::Transport, T::String, "Proxy used for outgoing HTTPS requests"),
        DictionaryOption::new("shutdownTimeout", "Shutdown Timeout", C::Transport, T::Number, "Time allowed to flush queued events on shutdown"),
        // Debugging
        DictionaryOption::new("debug", "Debug", C::Debugging, T::Boolean, "Prints SDK diagnostic output")
            .default_value("false")
            .guidance("Enable only while troubleshooting the SDK setup")
            .alias("isDebug"),
        DictionaryOption::new("attachStacktrace", "Attach Stacktrace", C::Debugging, T::Boolean, "Attach stack traces to message events")
            .alias("isAttachStacktrace"),
        DictionaryOption::new("maxBreadcrumbs", "Max Breadcrumbs", C::Debugging, T::Number, "Maximum number of breadcrumbs kept per event")
            .default_value("100"),
        DictionaryOption::new("diagnosticLevel", "Diagnostic Level", C::Debugging, T::String, "Verbosity of SDK diagnostic output when debug is on")
            .related(&["debug"]),
        // Sessions
        DictionaryOption::new("autoSessionTracking", "Auto Session Tracking", C::Sessions, T::Boolean, "Tracks sessions for release health")
            .alias("enableAutoSessionTracking")
            .alias("isEnableAutoSessionTracking"),
        DictionaryOption::new("sessionTrackingIntervalMillis", "Session Tracking Interval", C::Sessions, T::Number, "Background time after which a new session starts")
            .only_for(MOBILE),
        // Mobile
        DictionaryOption::new("attachScreenshot", "Attach Screenshot", C::Mobile, T::Boolean, "Attach a screenshot to error events")
            .warning("Screenshots can contain personal data visible on screen")
            .only_for(MOBILE)
            .alias("isAttachScreenshot"),
        DictionaryOption::new("attachViewHierarchy", "Attach View Hierarchy", C::Mobile, T::Boolean, "Attach the view hierarchy to error events")
            .only_for(MOBILE)
            .alias("isAttachViewHierarchy"),
        DictionaryOption::new("anrEnabled", "ANR Detection", C::Mobile, T::Boolean, "Report Application Not Responding events")
            .only_for(&[SyntaxId::Java, SyntaxId::Kotlin])
            .alias("isAnrEnabled"),
        DictionaryOption::new("enableAppHangTracking", "App Hang Tracking", C::Mobile, T::Boolean, "Report app hangs on Apple platforms")
            .only_for(&[SyntaxId::Cocoa]),
        // Elixir
        DictionaryOption::new("enableSourceCodeContext", "Source Code Context", C::Debugging, T::Boolean, "Include source code lines around stack frames")
            .only_for(&[SyntaxId::Elixir]),
        DictionaryOption::new("rootSourceCodePaths", "Root Source Code Paths", C::Debugging, T::Array, "Directories scanned for source code context")
            .only_for(&[SyntaxId::Elixir])
            .related(&["enableSourceCodeContext"]),
    ]
}

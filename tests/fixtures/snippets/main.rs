fn main() {
    let _guard = sentry::init(sentry::ClientOptions {
        dsn: "https://examplePublicKey@o0.ingest.sentry.io/0".parse().ok(),
        release: sentry::release_name!(),
        environment: Some("production".into()),
        traces_sample_rate: 0.2,
        send_default_pii: true,
        ..Default::default()
    });
}

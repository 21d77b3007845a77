use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::log::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use video_frame_notifier::aws::SqsClient;
use video_frame_notifier::environment::Environment;
use video_frame_notifier::queue_consumer::{QueueConsumer, QueueConsumerResources};
use video_frame_notifier::settings::NotifierSettings;
use video_frame_notifier::shutdown::Shutdown;
use video_frame_notifier::sqs_message_queue::SqsMessageQueue;
use video_frame_notifier_worker::routes::Routes;
use video_frame_notifier_worker::state::AppState;
use wg::WaitGroup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    let rust_log = Environment::string("RUST_LOG", "INFO,aws_config=WARN,aws_smithy_runtime=WARN");
    env::set_var("RUST_LOG", rust_log);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(Box::new(tracing_subscriber::fmt::layer().with_writer(non_blocking)))
        .init();

    info!("Starting...");

    let settings = NotifierSettings::from_env()?;
    let app_state = AppState::new(&settings)?;

    let wait_group = WaitGroup::new();

    tokio::spawn(init_http_server(app_state.clone(), settings.server_port, wait_group.add(1)));

    match settings.queue_url.clone() {
        Some(queue_url) => {
            tokio::spawn(init_queue_consumer(app_state, settings, queue_url, wait_group.add(1)));
        },
        None => info!("QUEUE_URL not set, queue consumer disabled"),
    }

    wait_group.wait();

    info!("Stopped!");

    Ok(())
}

async fn init_http_server(
    app_state: AppState,
    port: u16,
    wait_group: WaitGroup,
) {
    info!("Starting http server...");
    let routes = Routes::routes(&app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Running http server on {}...", addr);
            if let Err(error) = axum::serve(listener, routes).with_graceful_shutdown(Shutdown::signal("Stopping http server...")).await {
                error!("Http server failed with error: {}", error);
            }
        },
        Err(error) => error!("Failed to bind {}: {}", addr, error),
    }

    wait_group.done();

    info!("Http server stopped!");
}

async fn init_queue_consumer(
    app_state: AppState,
    settings: NotifierSettings,
    queue_url: String,
    wait_group: WaitGroup,
) {
    let sqs_client = SqsClient::from_env().await;
    let queue = SqsMessageQueue::new(sqs_client, &queue_url)
        .with_max_messages(settings.queue_max_messages)
        .with_wait_time_in_seconds(settings.queue_wait_time_in_seconds);

    let resources = QueueConsumerResources::new(app_state.notifier.clone(), Arc::new(queue)).with_poll_interval_in_seconds(settings.queue_poll_interval_in_seconds);

    if let Err(error) = QueueConsumer::new(resources)
        .with_graceful_shutdown(Shutdown::signal("Stopping queue consumer..."))
        .init()
        .await
    {
        error!("Queue consumer failed with error: {}", error);
    }

    wait_group.done();
}

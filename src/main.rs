//! Ticket Aggregator Server

use ticket_aggregator::AggregatorBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	AggregatorBuilder::new().start_server().await
}

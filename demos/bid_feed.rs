//! Bid feed walkthrough: drives the fallback state machine through a failed
//! connection, degraded polling and recovery, printing each step's effects.
//!
//! ```sh
//! cargo run --example bid_feed
//! ```

use anyhow::Result;
use clap::Parser;

use errand::prelude::*;

/// Arguments for the bid feed demo.
#[derive(Debug, Parser)]
struct Args {
    /// Ride id to track.
    #[clap(short, long, default_value = "ride-demo")]
    ride: String,
}

fn step(feed: &mut BidFeed, label: &str, event: FeedEvent) {
    let effects = feed.handle(event);
    println!("{label:<28} phase={:?} effects={effects:?}", feed.phase());
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut feed, effects) = BidFeed::start(RideId::new(args.ride));
    println!("{:<28} phase={:?} effects={effects:?}", "start", feed.phase());

    step(&mut feed, "connect deadline", FeedEvent::Timer(TimerKind::ConnectTimeout));
    let ride = feed.ride().clone();
    step(
        &mut feed,
        "poll returns two bids",
        FeedEvent::PollCompleted(vec![
            Bid {
                id: BidId::new("b1"),
                ride: ride.clone(),
                driver: DriverId::new("d1"),
                driver_name: "Sam".to_owned(),
                rating: 4.7,
                fare: Price::from_minor(700),
                eta_minutes: 4,
            },
            Bid {
                id: BidId::new("b2"),
                ride: ride.clone(),
                driver: DriverId::new("d2"),
                driver_name: "Noor".to_owned(),
                rating: 4.9,
                fare: Price::from_minor(650),
                eta_minutes: 7,
            },
        ]),
    );
    step(&mut feed, "reconnect timer", FeedEvent::Timer(TimerKind::Reconnect));
    step(&mut feed, "socket comes up", FeedEvent::SocketUp);
    let ride = feed.ride().clone();
    step(
        &mut feed,
        "pushed bid undercuts",
        FeedEvent::BidPushed(Bid {
            id: BidId::new("b3"),
            ride,
            driver: DriverId::new("d3"),
            driver_name: "Kai".to_owned(),
            rating: 4.5,
            fare: Price::from_minor(600),
            eta_minutes: 3,
        }),
    );

    println!("\nfinal bid board:");
    for bid in feed.bids() {
        println!(
            "  {} {} {} eta {}m",
            bid.id,
            bid.driver_name,
            bid.fare.display("USD")?,
            bid.eta_minutes
        );
    }

    Ok(())
}

//! Example demonstrating region algebra on an array and a timeline.
//!
//! Run with: `cargo run --example region_usage`

use qtty::{Minute, Quantity, Second};
use regionalg::{ArraySpace, Space, SpecificPosition, TimeSpace, TimeSpaceConfig};

fn main() {
    println!("=== Region Algebra Usage Example ===\n");

    let space = ArraySpace::standard();
    let a = space.range(0, 9);
    let b = space.range(5, 14);

    println!("--- Set Algebra ---");
    println!("a = {}", a);
    println!("b = {}", b);
    println!("a | b = {}", a.union(&b).or_sentinel());
    println!("a & b = {}", a.intersection(&b).or_sentinel());
    println!("a ^ b = {}", a.difference(&b).or_sentinel());
    println!("a - b = {}", a.subtract(&b).or_sentinel());

    println!("\n--- Splitting ---");
    let chunks = space.range(0, 9).split(3);
    println!("[0, 9] into 3: {}", chunks);
    let fixed = space.range(0, 9).split_by(&space.length(4));
    println!("[0, 9] by 4:   {}", fixed);

    println!("\n--- Bounded Arithmetic ---");
    let small = ArraySpace::with_bounds(0, 99).expect("valid bounds");
    let past_end = small.expr(small.max()).add(&small.one()).position();
    match past_end.error() {
        Some(e) => println!("max + 1 -> {} ({})", past_end.value(), e),
        None => println!("max + 1 -> {}", past_end.value()),
    }

    println!("\n--- Timeline ---");
    let day = TimeSpace::new(TimeSpaceConfig::<Second> {
        interval: Quantity::new(900.0),
        origin: Quantity::new(0.0),
        num_intervals: 96,
    })
    .expect("valid time space");
    let morning = day.region(
        &day.tick_at(Quantity::<Minute>::new(8.0 * 60.0)),
        &day.tick_at(Quantity::<Minute>::new(12.0 * 60.0)),
    );
    let meeting = day.region(
        &day.tick_at(Quantity::<Minute>::new(10.0 * 60.0)),
        &day.tick_at(Quantity::<Minute>::new(11.0 * 60.0)),
    );
    let free = morning.subtract(&meeting).or_sentinel();
    println!("morning ticks: {}", morning);
    println!("free ticks:    {}", free);
    println!(
        "free time:     {:.0} s",
        day.duration_of(&free.size()).value()
    );
    let lunch = day.tick_at(Quantity::<Minute>::new(11.5 * 60.0));
    match free.search(&SpecificPosition::new(lunch.clone())) {
        Some(hit) => println!("tick {} is free (slot {})", hit.position, hit.sub_region),
        None => println!("tick {} is taken", lunch),
    }
}

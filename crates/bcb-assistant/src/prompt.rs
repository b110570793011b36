use std::fmt::Write as _;

use bcb_core::{MatchdayEvent, Product};

const PERSONA: &str = "You are the Bayou City Blues / Chelsea Houston shopping assistant. \
Chelsea supporters group in Houston, TX, est. 2011. \"Carefree in the 713.\" \
Help customers find merch.";

const SIGN_OFF: &str = "Be friendly, concise (2-3 sentences). KTBFFH!";

/// Builds the assistant's system prompt: persona, one line per product,
/// one line per upcoming event, then tone guidance.
#[must_use]
pub fn build_system_prompt(products: &[Product], events: &[MatchdayEvent]) -> String {
    let mut prompt = String::with_capacity(256 + products.len() * 96 + events.len() * 80);
    prompt.push_str(PERSONA);

    prompt.push_str("\n\nProducts:\n");
    for product in products {
        // Writing to a String cannot fail.
        let _ = writeln!(
            prompt,
            "- {} ({}) - {}",
            product.name, product.price, product.description
        );
    }

    prompt.push_str("\nEvents:\n");
    for event in events {
        let _ = writeln!(
            prompt,
            "- {} {}: {} at {}",
            event.date, event.time, event.fixture, event.venue
        );
    }

    prompt.push('\n');
    prompt.push_str(SIGN_OFF);
    prompt
}

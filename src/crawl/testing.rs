// src/crawl/testing.rs
// =============================================================================
// Test helper: a wiremock responder that records when each request arrived
// and answers after a fixed delay.
//
// Every request that arrives less than `delay` after another one is still
// waiting for its answer when that other one comes in, so the largest
// number of arrivals inside any window shorter than `delay` is a lower
// bound on how many requests were in flight together.
// =============================================================================

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::{Request, Respond, ResponseTemplate};

#[derive(Clone)]
pub struct SlowResponder {
    arrivals: Arc<Mutex<Vec<Instant>>>,
    delay: Duration,
    body: String,
}

impl SlowResponder {
    pub fn new(delay: Duration, body: &str) -> Self {
        Self {
            arrivals: Arc::new(Mutex::new(Vec::new())),
            delay,
            body: body.to_string(),
        }
    }

    pub fn total(&self) -> usize {
        self.arrivals.lock().unwrap().len()
    }

    // Most arrivals seen within half the delay of each other
    pub fn max_in_flight(&self) -> usize {
        let arrivals = self.arrivals.lock().unwrap();
        let window = self.delay / 2;
        arrivals
            .iter()
            .map(|&at| {
                arrivals
                    .iter()
                    .filter(|&&other| other <= at && at.duration_since(other) < window)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }
}

impl Respond for SlowResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());
        ResponseTemplate::new(200)
            .set_body_string(self.body.clone())
            .set_delay(self.delay)
    }
}

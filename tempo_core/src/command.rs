//! Command routing: text -> `SpeedRequest` -> controller call -> `Reply`.
//!
//! Accepted forms (an optional leading `speed` or `/speed` is ignored):
//! - (nothing): show the current speed
//! - `<multiplier>`: set an absolute speed
//! - `toggle`, `reset`
//! - `increase [amount]` / `i [amount]`, `decrease [amount]` / `d [amount]`

use tempo_config::NORMAL_SPEED;
use tempo_traits::{Notifier, SpeedStore, TimeDilation};

use crate::controller::SpeedController;
use crate::error::{Result, SpeedError};
use crate::format::{capped_reply, current_speed_reply};
use crate::validator::{SpeedBounds, speeds_equal};

/// Step used by `increase` / `decrease` without an explicit amount.
pub const DEFAULT_ADJUSTMENT_DELTA: f32 = 0.1;

pub const USAGE: &str =
    "usage: speed [<multiplier> | toggle | reset | increase|i [amount] | decrease|d [amount]]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedRequest {
    Show,
    Set(f32),
    Toggle,
    Reset,
    Increase(Option<f32>),
    Decrease(Option<f32>),
}

struct Route {
    name: &'static str,
    aliases: &'static [&'static str],
    takes_amount: bool,
    build: fn(Option<f32>) -> SpeedRequest,
}

fn toggle(_: Option<f32>) -> SpeedRequest {
    SpeedRequest::Toggle
}

fn reset(_: Option<f32>) -> SpeedRequest {
    SpeedRequest::Reset
}

const ROUTES: &[Route] = &[
    Route {
        name: "toggle",
        aliases: &[],
        takes_amount: false,
        build: toggle,
    },
    Route {
        name: "reset",
        aliases: &[],
        takes_amount: false,
        build: reset,
    },
    Route {
        name: "increase",
        aliases: &["i"],
        takes_amount: true,
        build: SpeedRequest::Increase,
    },
    Route {
        name: "decrease",
        aliases: &["d"],
        takes_amount: true,
        build: SpeedRequest::Decrease,
    },
];

impl Route {
    fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

fn parse_number(word: &str, what: &str) -> Result<f32> {
    word.parse::<f32>()
        .map_err(|_| SpeedError::Usage(format!("invalid {what} '{word}'\n{USAGE}")))
}

impl SpeedRequest {
    /// Parse one command line.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace().peekable();
        if matches!(words.peek(), Some(&"speed" | &"/speed")) {
            words.next();
        }
        let args: Vec<&str> = words.collect();

        let Some((&first, rest)) = args.split_first() else {
            return Ok(SpeedRequest::Show);
        };

        if let Some(route) = ROUTES.iter().find(|r| r.matches(first)) {
            return match (route.takes_amount, rest) {
                (_, []) => Ok((route.build)(None)),
                (true, [amount]) => Ok((route.build)(Some(parse_number(amount, "amount")?))),
                _ => Err(SpeedError::Usage(format!(
                    "too many arguments for '{}'\n{USAGE}",
                    route.name
                ))),
            };
        }

        if !rest.is_empty() {
            return Err(SpeedError::Usage(format!("unexpected arguments\n{USAGE}")));
        }
        parse_number(first, "multiplier").map(SpeedRequest::Set)
    }
}

/// What the command layer reports back to the user who issued the command.
/// Broadcasts to everyone go through the `Notifier` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Silent,
    Message(String),
    Failure { message: String, error: SpeedError },
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Silent => None,
            Reply::Message(m) | Reply::Failure { message: m, .. } => Some(m),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failure { .. })
    }

    fn failure(error: SpeedError) -> Self {
        Reply::Failure {
            message: error.to_string(),
            error,
        }
    }
}

/// Route one request into the controller. Never panics; every failure turns
/// into a `Reply::Failure`.
pub fn execute<P, R, N>(ctl: &mut SpeedController<P, R, N>, request: SpeedRequest) -> Reply
where
    P: SpeedStore,
    R: TimeDilation,
    N: Notifier,
{
    match request {
        SpeedRequest::Show => Reply::Message(current_speed_reply(ctl.current_state().current_speed)),
        SpeedRequest::Set(v) => match ctl.set_speed(v) {
            Ok(()) => Reply::Silent,
            Err(e) => Reply::failure(e),
        },
        SpeedRequest::Toggle => {
            ctl.toggle_speed();
            Reply::Silent
        }
        SpeedRequest::Reset => match ctl.set_speed(NORMAL_SPEED) {
            Ok(()) => Reply::Silent,
            Err(e) => Reply::failure(e),
        },
        SpeedRequest::Increase(amount) => adjust(
            ctl,
            amount.unwrap_or(DEFAULT_ADJUSTMENT_DELTA),
            "increase",
            |b| b.max,
        ),
        SpeedRequest::Decrease(amount) => adjust(
            ctl,
            -amount.unwrap_or(DEFAULT_ADJUSTMENT_DELTA),
            "decrease",
            |b| b.min,
        ),
    }
}

/// Parse and execute in one go; parse errors become failures too.
pub fn execute_line<P, R, N>(ctl: &mut SpeedController<P, R, N>, line: &str) -> Reply
where
    P: SpeedStore,
    R: TimeDilation,
    N: Notifier,
{
    match SpeedRequest::parse(line) {
        Ok(req) => execute(ctl, req),
        Err(e) => Reply::failure(e),
    }
}

fn adjust<P, R, N>(
    ctl: &mut SpeedController<P, R, N>,
    delta: f32,
    verb: &str,
    cap: fn(&SpeedBounds) -> f32,
) -> Reply
where
    P: SpeedStore,
    R: TimeDilation,
    N: Notifier,
{
    match ctl.adjust_speed(delta) {
        Ok(new_speed) => {
            let bound = cap(&ctl.bounds());
            if speeds_equal(new_speed, bound) {
                Reply::Message(capped_reply(bound))
            } else {
                Reply::Silent
            }
        }
        Err(e) => Reply::Failure {
            message: format!("Failed to {verb} speed: {e}"),
            error: e,
        },
    }
}

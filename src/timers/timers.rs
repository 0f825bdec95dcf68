use super::{Duration, Instant};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(start) = self.start.take() {
            self.elapsed += start.elapsed();
        }
    }
}

// ordered by name so that printed output is deterministic
#[derive(Debug, Default)]
struct SubTimersMap(BTreeMap<&'static str, InnerTimer>);

impl SubTimersMap {
    fn start_subtimer(&mut self, key: &'static str) {
        self.0.entry(key).or_default().start();
    }

    fn total_time(&self) -> Duration {
        self.0.values().map(|t| t.elapsed).sum()
    }

    fn find(&self, path: &[&'static str]) -> Option<&InnerTimer> {
        let (first, rest) = path.split_first()?;
        let t = self.0.get(first)?;
        if rest.is_empty() {
            Some(t)
        } else {
            t.subtimers.find(rest)
        }
    }

    fn print(&self, out: &mut dyn Write, depth: usize) -> std::io::Result<()> {
        for (key, val) in self.0.iter() {
            let tabs = format!("{: <1$}", "", 4 * depth);
            writeln!(out, "{}{:} : {:?}", tabs, *key, val.elapsed)?;
            val.subtimers.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// A tree of named timers.  Timers started while another is
/// running are recorded as its children.
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;
        let mut active = self.subtimers.0.get_mut(first)?;
        for key in rest {
            active = active.subtimers.0.get_mut(key)?;
        }
        Some(active)
    }

    /// Discards all recorded times.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.subtimers.0.clear();
    }

    /// Starts a timer named `key` as a child of the current timer.
    pub fn start_as_current(&mut self, key: &'static str) {
        match self.mut_active_timer() {
            Some(active) => active.subtimers.start_subtimer(key),
            None => self.subtimers.start_subtimer(key),
        }
        self.stack.push(key);
    }

    /// Stops the current timer, if any.
    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        self.stack.pop();
    }

    /// Stops every running timer.
    pub fn stop_all(&mut self) {
        while !self.stack.is_empty() {
            self.stop_current();
        }
    }

    /// Total time recorded in the root timers.
    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// Time recorded for the timer at `path`, e.g. `&["polish", "factor"]`
    pub fn elapsed(&self, path: &[&'static str]) -> Option<Duration> {
        self.subtimers.find(path).map(|t| t.elapsed)
    }

    /// Writes the timer tree to `out`, one timer per line.
    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.subtimers.print(out, 0)
    }
}

/// Wall-clock deadline measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// A deadline `seconds` from now.  Infinite or out of
    /// range values give a deadline that never expires.
    pub fn after_secs(seconds: f64) -> Self {
        let limit = Duration::try_from_secs_f64(seconds).ok();
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// true once the limit has passed
    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() > limit)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[test]
fn test_timer_tree() {
    let mut timers = Timers::default();
    timeit! {timers => "outer";
        timeit! {timers => "inner";
            let _x = 1 + 1;
        }
    }
    assert!(timers.elapsed(&["outer"]).is_some());
    assert!(timers.elapsed(&["outer", "inner"]).is_some());
    assert!(timers.elapsed(&["inner"]).is_none());
    assert!(timers.total_time() >= timers.elapsed(&["outer", "inner"]).unwrap());

    let mut out = Vec::new();
    timers.print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("outer : "));
    assert!(text.contains("\n    inner : "));

    timers.reset();
    assert_eq!(timers.total_time(), Duration::ZERO);
}

#[test]
fn test_deadline() {
    assert!(!Deadline::after_secs(f64::INFINITY).expired());
    assert!(!Deadline::after_secs(1e6).expired());
    let d = Deadline::after_secs(0.0);
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(d.expired());
}

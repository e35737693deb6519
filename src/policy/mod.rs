//! Admission control for `run_gcloud_command`.
//!
//! Decides, for an arbitrary argument vector, whether invoking the gcloud
//! binary is permitted. Matching is a whole-word prefix test against
//! configured allow/deny lists; the denylist additionally closes over
//! release tracks so that denying `compute ssh` also denies
//! `alpha compute ssh`, `beta compute ssh` and `preview compute ssh`.

mod list;

pub use list::PolicyList;

use serde::Serialize;

/// Release tracks a gcloud command may run under. GA commands carry no
/// leading track token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTrack {
    Ga,
    Alpha,
    Beta,
    Preview,
}

impl ReleaseTrack {
    pub const ALL: [ReleaseTrack; 4] = [
        ReleaseTrack::Ga,
        ReleaseTrack::Alpha,
        ReleaseTrack::Beta,
        ReleaseTrack::Preview,
    ];

    /// The prefix this track contributes to a command string.
    pub fn prefix(self) -> &'static str {
        match self {
            ReleaseTrack::Ga => "",
            ReleaseTrack::Alpha => "alpha ",
            ReleaseTrack::Beta => "beta ",
            ReleaseTrack::Preview => "preview ",
        }
    }
}

/// Outcome of evaluating one command against the configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyDecision {
    Allowed,
    DeniedByAllowlist,
    DeniedByDenylist,
}

/// Lower-case, trim, and append a single trailing space.
///
/// The trailing space is what enforces the word-boundary rule: both the
/// pattern and the candidate command end in a space after normalization, so
/// a prefix match can only succeed at a token edge. `app ` is a prefix of
/// `app deploy ` but not of `apphub `.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    out.push(' ');
    out
}

/// Allowlist matcher. An empty list admits every command.
///
/// Allowlist matching is deliberately not release-track-aware: enabling
/// `app` does not enable `alpha app`.
#[derive(Debug, Clone)]
pub struct AllowMatcher {
    patterns: PolicyList,
}

impl AllowMatcher {
    pub fn new<I, S>(allowlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: PolicyList::new(allowlist),
        }
    }

    pub fn matches(&self, command: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let cmd = normalize(command);
        self.patterns.iter().any(|pattern| cmd.starts_with(pattern))
    }
}

/// Denylist matcher. An empty list denies nothing.
///
/// A pattern without an explicit release track denies that command under
/// every track; a pattern that already names a track (e.g. `alpha bms`)
/// denies only that track, because the expanded form `alpha alpha bms`
/// never matches a real command.
#[derive(Debug, Clone)]
pub struct DenyMatcher {
    patterns: PolicyList,
    /// Pre-expanded `track + pattern` forms, normalized at construction so
    /// match calls are pure prefix tests.
    expanded: Vec<String>,
}

impl DenyMatcher {
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = PolicyList::new(denylist);
        let expanded = patterns
            .iter()
            .flat_map(|pattern| {
                ReleaseTrack::ALL
                    .iter()
                    .map(move |track| normalize(&format!("{}{pattern}", track.prefix())))
            })
            .collect();
        Self { patterns, expanded }
    }

    pub fn matches(&self, command: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let cmd = normalize(command);
        self.expanded.iter().any(|pattern| cmd.starts_with(pattern))
    }
}

/// The complete admission policy for one server process. Built once at
/// startup and shared read-only with every tool invocation.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    allow: AllowMatcher,
    deny: DenyMatcher,
}

impl CommandPolicy {
    pub fn new(allow: AllowMatcher, deny: DenyMatcher) -> Self {
        Self { allow, deny }
    }

    /// Evaluate a raw argument vector.
    ///
    /// The vector is joined with single spaces to form the command string.
    /// The allowlist stage runs first; a command passing it is then checked
    /// against the denylist, so denial wins when both lists match.
    pub fn evaluate(&self, args: &[String]) -> PolicyDecision {
        let command = args.join(" ");
        if !self.allow.matches(&command) {
            return PolicyDecision::DeniedByAllowlist;
        }
        if self.deny.matches(&command) {
            return PolicyDecision::DeniedByDenylist;
        }
        PolicyDecision::Allowed
    }
}

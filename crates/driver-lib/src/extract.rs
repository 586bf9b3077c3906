//! Field extraction from semi-structured command output
//!
//! Extraction plans are fixed per driver: regular-expression captures for
//! text, typed serde models for JSON. A mandatory capture that does not
//! match fails the whole extraction; the caller surfaces a generic failure
//! rather than a partial record. Optional shapes (unexpected quser lines,
//! INFO comment lines) are skipped silently.

use crate::error::DriverError;
use crate::output::Variable;
use regex::Regex;
use std::sync::OnceLock;

static RTT_RE: OnceLock<Regex> = OnceLock::new();
static LOSS_RE: OnceLock<Regex> = OnceLock::new();

/// Latency and loss figures pulled from one ping run
#[derive(Debug, Clone, PartialEq)]
pub struct PingStats {
    pub average_ms: f64,
    pub packet_loss_pct: u32,
}

/// Parse the rtt summary quad and the packet-loss percentage from ping
/// output. Both captures are mandatory.
pub fn parse_ping_stats(output: &str) -> Result<PingStats, DriverError> {
    let rtt = RTT_RE.get_or_init(|| {
        Regex::new(r"(\d+\.\d+)/(\d+\.\d+)/(\d+\.\d+)/(\d+\.\d+) ms").expect("valid pattern")
    });
    let loss =
        LOSS_RE.get_or_init(|| Regex::new(r"(\d+)% packet loss").expect("valid pattern"));

    // min/avg/max/mdev: the quad's second value is the average
    let captures = rtt
        .captures(output)
        .ok_or_else(|| DriverError::generic("ping output is missing the rtt summary"))?;
    let average_ms = captures[2]
        .parse::<f64>()
        .map_err(|e| DriverError::generic(format!("unparseable rtt average: {}", e)))?;

    let captures = loss
        .captures(output)
        .ok_or_else(|| DriverError::generic("ping output is missing the packet-loss line"))?;
    let packet_loss_pct = captures[1]
        .parse::<u32>()
        .map_err(|e| DriverError::generic(format!("unparseable packet loss: {}", e)))?;

    Ok(PingStats {
        average_ms,
        packet_loss_pct,
    })
}

/// One logged-in session from `quser` output
#[derive(Debug, Clone, PartialEq)]
pub struct QuserSession {
    pub username: String,
    pub session_name: String,
    pub session_id: String,
    pub state: String,
    pub idle_time: String,
    pub logon_time: String,
}

/// Parse `quser` output into session records
///
/// The header line is skipped. Lines collapse to 7 tokens when the session
/// has no session name (disconnected) or 8 when it does; anything else is
/// skipped. The `>` marker on the current session is stripped before
/// tokenizing.
pub fn parse_quser_sessions(output: &str) -> Vec<QuserSession> {
    let mut sessions = Vec::new();

    for line in output.lines().skip(1) {
        let line = line.trim_start_matches('>');
        let words: Vec<&str> = line.split_whitespace().collect();

        let (session_name, offset) = match words.len() {
            7 => (String::new(), 0),
            8 => (words[1].to_string(), 1),
            _ => continue,
        };

        sessions.push(QuserSession {
            username: words[0].to_string(),
            session_name,
            session_id: words[1 + offset].to_string(),
            state: words[2 + offset].to_string(),
            idle_time: words[3 + offset].to_string(),
            logon_time: format!(
                "{} {} {}",
                words[4 + offset],
                words[5 + offset],
                words[6 + offset]
            ),
        });
    }

    sessions
}

/// Parse redis `INFO` output into variables
///
/// Keeps only `key:value` lines with exactly one colon, drops the
/// human-formatted duplicates (`*_human`), and labels each variable with
/// the key's underscores replaced by spaces.
pub fn parse_info_variables(output: &str) -> Vec<Variable> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(':').collect();
            if parts.len() != 2 {
                return None;
            }
            let (key, value) = (parts[0], parts[1].trim());
            if key.ends_with("_human") {
                return None;
            }
            Some(Variable::new(key, key.replace('_', " "), value))
        })
        .collect()
}

/// Inclusion filter for list-shaped payloads
///
/// A first filter token of `all` (any case) accepts every entity; otherwise
/// an entity is accepted when its lowercased name contains any lowercased
/// filter token as a substring. An empty filter list accepts everything.
pub fn include_entity(name: &str, filters: &[String]) -> bool {
    match filters.first() {
        None => true,
        Some(first) if first.eq_ignore_ascii_case("all") => true,
        _ => {
            let name = name.to_lowercase();
            filters.iter().any(|f| name.contains(&f.to_lowercase()))
        }
    }
}

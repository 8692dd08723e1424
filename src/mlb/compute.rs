//! Derived views over fetched stat rows: leaders, top-N and name filtering.
//!
//! Nothing here mutates or re-orders the fetched list; every function returns
//! borrowed rows in a fresh `Vec`.

use std::cmp::Ordering;

use crate::cli::types::{SortStat, StatGroup, TeamStatType};
use crate::mlb::types::{PlayerStat, TeamStat};


/// Sort value for a missing stat on a higher-is-better field.
pub const MISSING_HIGHER_BETTER: f64 = 0.0;

/// Sort value for a missing stat on a lower-is-better field. Worse than any
/// real ERA or WHIP, so missing data never wins.
pub const MISSING_LOWER_BETTER: f64 = 999.0;

/// A raw stat as the service sent it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue<'a> {
    Count(u32),
    /// String-encoded decimal such as `".251"` or `"3.74"`.
    Rate(&'a str),
}

impl StatValue<'_> {
    /// Numeric value, `None` when a rate string doesn't parse to a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Count(n) => Some(f64::from(*n)),
            StatValue::Rate(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            StatValue::Count(n) => n.to_string(),
            StatValue::Rate(s) => s.to_string(),
        }
    }
}

/// A rankable stat column.
pub trait StatField: Copy {
    fn name(&self) -> &'static str;

    fn lower_is_better(&self) -> bool;

    fn extract<'a, T: StatRow>(&self, row: &'a T) -> Option<StatValue<'a>>;
}

impl StatField for SortStat {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn lower_is_better(&self) -> bool {
        SortStat::lower_is_better(self)
    }

    fn extract<'a, T: StatRow>(&self, row: &'a T) -> Option<StatValue<'a>> {
        row.stat(*self)
    }
}

/// A leaderboard row that exposes its stats by field, plus the names used
/// for text search.
pub trait StatRow {
    fn stat(&self, field: SortStat) -> Option<StatValue<'_>>;

    fn display_name(&self) -> &str;

    fn team_name(&self) -> Option<&str>;
}

fn count(v: Option<u32>) -> Option<StatValue<'static>> {
    v.map(StatValue::Count)
}

fn rate(v: &Option<String>) -> Option<StatValue<'_>> {
    v.as_deref().map(StatValue::Rate)
}

impl StatRow for PlayerStat {
    fn stat(&self, field: SortStat) -> Option<StatValue<'_>> {
        match field {
            SortStat::HomeRuns => count(self.home_runs),
            SortStat::Avg => rate(&self.avg),
            SortStat::Rbi => count(self.rbi),
            SortStat::Runs => count(self.runs),
            SortStat::Era | SortStat::EarnedRunAverage => rate(&self.era),
            SortStat::Whip => rate(&self.whip),
            SortStat::Wins => count(self.wins),
            SortStat::Saves => count(self.saves),
            SortStat::StrikeOuts => count(self.strike_outs),
            SortStat::Fielding => rate(&self.fielding),
            SortStat::Assists => count(self.assists),
            SortStat::PutOuts => count(self.put_outs),
        }
    }

    fn display_name(&self) -> &str {
        &self.player_name
    }

    fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }
}

impl StatRow for TeamStat {
    fn stat(&self, field: SortStat) -> Option<StatValue<'_>> {
        match field {
            SortStat::HomeRuns => count(self.home_runs),
            SortStat::Avg => rate(&self.avg),
            SortStat::Rbi => count(self.rbi),
            SortStat::Runs => count(self.runs),
            SortStat::Era | SortStat::EarnedRunAverage => rate(&self.era),
            SortStat::Whip => rate(&self.whip),
            SortStat::Wins => count(self.wins),
            SortStat::Saves => count(self.saves),
            SortStat::StrikeOuts => count(self.strike_outs),
            SortStat::Fielding | SortStat::Assists | SortStat::PutOuts => None,
        }
    }

    fn display_name(&self) -> &str {
        &self.team_name
    }

    fn team_name(&self) -> Option<&str> {
        self.team_short_name.as_deref()
    }
}

/// Value used for ranking `row` on `field`, with missing data mapped to the
/// worst possible value for that field's direction.
pub fn sort_value<T: StatRow, F: StatField>(row: &T, field: F) -> f64 {
    match field.extract(row).and_then(|v| v.as_f64()) {
        Some(v) => v,
        None if field.lower_is_better() => MISSING_LOWER_BETTER,
        None => MISSING_HIGHER_BETTER,
    }
}

/// Best `n` rows on `field`, best first. Stable: ties keep input order.
pub fn top_n_by<T: StatRow, F: StatField>(rows: &[T], field: F, n: usize) -> Vec<&T> {
    let mut ranked: Vec<(f64, &T)> = rows.iter().map(|r| (sort_value(r, field), r)).collect();

    ranked.sort_by(|(a, _), (b, _)| {
        let ord = if field.lower_is_better() {
            a.partial_cmp(b)
        } else {
            b.partial_cmp(a)
        };
        ord.unwrap_or(Ordering::Equal)
    });

    ranked.into_iter().take(n).map(|(_, r)| r).collect()
}

/// The single best row on `field`; `None` for an empty list.
pub fn top_by<T: StatRow, F: StatField>(rows: &[T], field: F) -> Option<&T> {
    top_n_by(rows, field, 1).into_iter().next()
}

/// One quick-stat card: the leading row for a field.
#[derive(Debug, Clone, Copy)]
pub struct Leader<'a, T> {
    pub label: &'static str,
    pub field: SortStat,
    pub row: &'a T,
}

impl<T: StatRow> Leader<'_, T> {
    /// Leader's value as sent by the service, `--` when absent.
    pub fn value(&self) -> String {
        self.field
            .extract(self.row)
            .map(|v| v.display())
            .unwrap_or_else(|| "--".to_string())
    }
}

const HITTING_LEADERS: [(SortStat, &str); 3] = [
    (SortStat::HomeRuns, "Home Runs"),
    (SortStat::Avg, "Batting Average"),
    (SortStat::Rbi, "RBI"),
];

const PITCHING_LEADERS: [(SortStat, &str); 3] = [
    (SortStat::Era, "ERA"),
    (SortStat::Wins, "Wins"),
    (SortStat::Saves, "Saves"),
];

const FIELDING_LEADERS: [(SortStat, &str); 3] = [
    (SortStat::Fielding, "Fielding %"),
    (SortStat::Assists, "Assists"),
    (SortStat::PutOuts, "Putouts"),
];

const TEAM_HITTING_LEADERS: [(SortStat, &str); 3] = [
    (SortStat::HomeRuns, "Home Runs"),
    (SortStat::Avg, "Batting Average"),
    (SortStat::Runs, "Runs Scored"),
];

const TEAM_PITCHING_LEADERS: [(SortStat, &str); 3] = [
    (SortStat::Era, "Team ERA"),
    (SortStat::StrikeOuts, "Strikeouts"),
    (SortStat::Whip, "WHIP"),
];

fn leaders_for<'a, T: StatRow>(
    rows: &'a [T],
    fields: &[(SortStat, &'static str)],
) -> Vec<Leader<'a, T>> {
    fields
        .iter()
        .filter_map(|&(field, label)| top_by(rows, field).map(|row| Leader { label, field, row }))
        .collect()
}

/// Quick-stat cards for a player group. Each field is ranked on its own, so
/// different players can lead different categories.
pub fn category_leaders(players: &[PlayerStat], group: StatGroup) -> Vec<Leader<'_, PlayerStat>> {
    let fields = match group {
        StatGroup::Hitting => &HITTING_LEADERS,
        StatGroup::Pitching => &PITCHING_LEADERS,
        StatGroup::Fielding => &FIELDING_LEADERS,
    };
    leaders_for(players, fields)
}

/// Quick-stat cards for the team leaderboard.
pub fn team_leaders(teams: &[TeamStat], stat_type: TeamStatType) -> Vec<Leader<'_, TeamStat>> {
    let fields = match stat_type {
        TeamStatType::Hitting => &TEAM_HITTING_LEADERS,
        TeamStatType::Pitching => &TEAM_PITCHING_LEADERS,
    };
    leaders_for(teams, fields)
}

/// Case-insensitive substring match on the row's name or its team name.
/// A blank term matches everything.
pub fn filter_by_name<'a, T: StatRow>(rows: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            row.display_name().to_lowercase().contains(&needle)
                || row
                    .team_name()
                    .is_some_and(|team| team.to_lowercase().contains(&needle))
        })
        .collect()
}

/// `".583"` → `"58.3%"`; unparseable input → `"--"`.
pub fn format_win_pct(winning_percentage: &str) -> String {
    match winning_percentage.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() => format!("{:.1}%", pct * 100.0),
        _ => "--".to_string(),
    }
}

//! Simulation report generation.

use super::runner::RunStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Floors the report tracks arrival times for.
const FLOOR_MILESTONES: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub sim_seconds: u64,

    // Aggregated stats
    pub avg_final_floor: f64,
    pub avg_highest_floor: f64,
    pub avg_final_level: f64,
    pub avg_total_kills: f64,
    pub avg_prestiges: f64,
    pub kills_per_second: f64,
    pub gold_per_second: f64,

    // Encounters
    pub avg_rare_kills: f64,
    pub avg_legendary_kills: f64,
    pub avg_monsters_fled: f64,
    pub avg_bosses_defeated: f64,
    pub avg_bosses_skipped: f64,
    pub avg_boss_timeouts: f64,
    pub avg_jackpots: f64,

    // Loot
    pub avg_items_dropped: f64,
    pub avg_items_auto_disassembled: f64,
    pub avg_items_equipped: f64,
    pub avg_cards_found: f64,
    pub avg_captures: f64,
    pub avg_relic_fragments: f64,

    /// Highest floor reached -> number of runs.
    pub highest_floor_distribution: BTreeMap<u32, u32>,
    /// Milestone floor -> (runs that reached it, average second of arrival).
    pub floor_milestones: BTreeMap<u32, (u32, f64)>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, sim_seconds: u64) -> Self {
        let num_runs = runs.len() as u32;
        let avg_total_kills = average(&runs, |r| r.total_kills as f64);
        let avg_gold = average(&runs, |r| r.gold_earned as f64);
        let seconds = sim_seconds.max(1) as f64;

        let mut highest_floor_distribution = BTreeMap::new();
        for run in &runs {
            *highest_floor_distribution.entry(run.highest_floor).or_insert(0) += 1;
        }

        let mut floor_milestones = BTreeMap::new();
        for floor in FLOOR_MILESTONES {
            let arrivals: Vec<u64> = runs
                .iter()
                .filter_map(|r| r.floor_first_reached.get(&floor).copied())
                .collect();
            if arrivals.is_empty() {
                continue;
            }
            let avg = arrivals.iter().sum::<u64>() as f64 / arrivals.len() as f64;
            floor_milestones.insert(floor, (arrivals.len() as u32, avg));
        }

        Self {
            num_runs,
            sim_seconds,
            avg_final_floor: average(&runs, |r| r.final_floor as f64),
            avg_highest_floor: average(&runs, |r| r.highest_floor as f64),
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_total_kills,
            avg_prestiges: average(&runs, |r| r.prestiges as f64),
            kills_per_second: avg_total_kills / seconds,
            gold_per_second: avg_gold / seconds,
            avg_rare_kills: average(&runs, |r| r.rare_kills as f64),
            avg_legendary_kills: average(&runs, |r| r.legendary_kills as f64),
            avg_monsters_fled: average(&runs, |r| r.monsters_fled as f64),
            avg_bosses_defeated: average(&runs, |r| r.bosses_defeated as f64),
            avg_bosses_skipped: average(&runs, |r| r.bosses_skipped as f64),
            avg_boss_timeouts: average(&runs, |r| r.boss_timeouts as f64),
            avg_jackpots: average(&runs, |r| r.jackpots as f64),
            avg_items_dropped: average(&runs, |r| r.items_dropped as f64),
            avg_items_auto_disassembled: average(&runs, |r| r.items_auto_disassembled as f64),
            avg_items_equipped: average(&runs, |r| r.items_equipped as f64),
            avg_cards_found: average(&runs, |r| r.cards_found as f64),
            avg_captures: average(&runs, |r| r.captures as f64),
            avg_relic_fragments: average(&runs, |r| r.relic_fragments_earned as f64),
            highest_floor_distribution,
            floor_milestones,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {}s simulated\n\n",
            self.num_runs, self.sim_seconds
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Floor:     {:.1}\n", self.avg_final_floor));
        report.push_str(&format!("  Avg Highest Floor:   {:.1}\n", self.avg_highest_floor));
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Prestiges:       {:.2}\n", self.avg_prestiges));
        report.push_str(&format!("  Avg Total Kills:     {:.0}\n", self.avg_total_kills));
        report.push_str(&format!("  Kills / Second:      {:.2}\n", self.kills_per_second));
        report.push_str(&format!("  Gold / Second:       {:.1}\n\n", self.gold_per_second));

        report.push_str("── ENCOUNTERS ───────────────────────────────────────────────────\n");
        report.push_str(&format!("  Rare Kills:          {:.2}\n", self.avg_rare_kills));
        report.push_str(&format!("  Legendary Kills:     {:.2}\n", self.avg_legendary_kills));
        report.push_str(&format!("  Monsters Fled:       {:.2}\n", self.avg_monsters_fled));
        report.push_str(&format!("  Bosses Defeated:     {:.1}\n", self.avg_bosses_defeated));
        report.push_str(&format!("  Bosses Skipped:      {:.1}\n", self.avg_bosses_skipped));
        report.push_str(&format!("  Boss Timeouts:       {:.1}\n", self.avg_boss_timeouts));
        report.push_str(&format!("  Gold Jackpots:       {:.2}\n\n", self.avg_jackpots));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Items Dropped:       {:.1}\n", self.avg_items_dropped));
        report.push_str(&format!(
            "  Auto-Disassembled:   {:.1}\n",
            self.avg_items_auto_disassembled
        ));
        report.push_str(&format!("  Upgrades Equipped:   {:.1}\n", self.avg_items_equipped));
        report.push_str(&format!("  Companion Cards:     {:.1}\n", self.avg_cards_found));
        report.push_str(&format!("  Captures:            {:.1}\n", self.avg_captures));
        report.push_str(&format!("  Relic Fragments:     {:.1}\n\n", self.avg_relic_fragments));

        report.push_str("── FLOOR MILESTONES ─────────────────────────────────────────────\n");
        if self.floor_milestones.is_empty() {
            report.push_str("  No run reached floor 10\n");
        }
        for (floor, (reached, avg_second)) in &self.floor_milestones {
            let pct = (*reached as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Floor {:3}: {:>5.1}% at {:>7.0}s {}\n",
                floor, pct, avg_second, bar
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.avg_boss_timeouts > self.avg_bosses_defeated {
            report.push_str("  ⚠️  Bosses time out more often than they die - boss HP too high?\n");
        }
        if self.avg_highest_floor < 10.0 && self.sim_seconds >= 3_600 {
            report.push_str("  ⚠️  Most runs stuck early - early floors too hard?\n");
        }
        if self.avg_monsters_fled > self.avg_rare_kills + self.avg_legendary_kills {
            report.push_str("  ⚠️  Rare monsters escape more than they die\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

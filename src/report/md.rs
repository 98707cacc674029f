use crate::types::report::{AnalysisReport, Comparison, Leader};
use crate::types::snapshot::{DailyCommits, RepositorySnapshot};
use chrono::{DateTime, Utc};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const TOPICS_SHOWN: usize = 5;

pub fn to_markdown(report: &AnalysisReport) -> String {
    let snapshot = &report.snapshot;
    let score = &report.score;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", snapshot.full_name));
    if let Some(description) = &snapshot.description {
        output.push_str(&format!("_{}_\n\n", description.trim()));
    }
    if let Some(language) = &snapshot.primary_language {
        output.push_str(&format!("Primary language: {language}\n"));
    }
    if !snapshot.topics.is_empty() {
        let topics = snapshot
            .topics
            .iter()
            .take(TOPICS_SHOWN)
            .cloned()
            .collect::<Vec<_>>();
        output.push_str(&format!("Topics: {}\n", topics.join(", ")));
    }
    output.push('\n');

    output.push_str("## Health Score\n\n");
    output.push_str(&format!(
        "Overall score: {:.1}/100 ({})\n\n",
        score.total_score,
        report.grade.label()
    ));
    output.push_str("| Component | Score | Based on |\n|---|---|---|\n");
    output.push_str(&format!(
        "| Activity | {:.1}/25 | Recent commits, issues and pull requests |\n",
        score.activity_score
    ));
    output.push_str(&format!(
        "| Popularity | {:.1}/25 | Stars, forks and watchers |\n",
        score.popularity_score
    ));
    output.push_str(&format!(
        "| Community | {:.1}/25 | Contributors and community features |\n",
        score.community_score
    ));
    output.push_str(&format!(
        "| Maintenance | {:.1}/25 | Update recency, open issue load, project hygiene |\n\n",
        score.maintenance_score
    ));

    output.push_str("## Key Metrics\n\n");
    for (label, value) in [
        ("Stars", snapshot.stargazers_count),
        ("Forks", snapshot.forks_count),
        ("Watchers", snapshot.watchers_count),
        ("Open issues", snapshot.open_issues_count),
        ("Open pull requests", snapshot.open_prs_count),
        ("Contributors", snapshot.contributors_count),
    ] {
        output.push_str(&format!("- {label}: {}\n", format_count(value)));
    }
    output.push('\n');

    output.push_str("## Repository Information\n\n");
    output.push_str(&format!("- Created: {}\n", format_date(snapshot.created_at)));
    output.push_str(&format!(
        "- Last updated: {}\n",
        format_date(snapshot.updated_at)
    ));
    output.push_str(&format!("- Default branch: {}\n", snapshot.default_branch));
    output.push_str(&format!(
        "- License: {}\n",
        snapshot.license_name.as_deref().unwrap_or("Not specified")
    ));
    output.push_str(&format!("- Size: {} KB\n\n", format_count(snapshot.size_kb)));

    output.push_str("## Features\n\n");
    for (label, enabled) in [
        ("Issues", snapshot.has_issues),
        ("Wiki", snapshot.has_wiki),
        ("Pages", snapshot.has_pages),
        ("Projects", snapshot.has_projects),
        ("Archived", snapshot.archived),
        ("Fork", snapshot.is_fork),
    ] {
        output.push_str(&format!("- {label}: {}\n", yes_no(enabled)));
    }
    output.push('\n');

    output.push_str("## Commit Activity (Last 30 Days)\n\n");
    push_commit_activity(&mut output, snapshot);

    output.push_str("## Links\n\n");
    push_links(&mut output, snapshot);

    output
}

pub fn comparison_to_markdown(comparison: &Comparison) -> String {
    let left = &comparison.left.snapshot.full_name;
    let right = &comparison.right.snapshot.full_name;
    let mut output = String::new();

    output.push_str(&format!("# {left} vs {right}\n\n"));
    output.push_str(&format!(
        "| Component | {left} | {right} | Difference | Leader |\n|---|---|---|---|---|\n"
    ));
    for delta in &comparison.deltas {
        output.push_str(&format!(
            "| {} | {:.1} | {:.1} | {:+.1} | {} |\n",
            delta.component,
            delta.left,
            delta.right,
            delta.delta,
            leader_name(delta.leader, left, right)
        ));
    }
    output.push('\n');

    match comparison.overall_leader() {
        Leader::Tie => output.push_str("Both repositories score the same overall.\n"),
        leader => output.push_str(&format!(
            "{} is healthier overall.\n",
            leader_name(leader, left, right)
        )),
    }
    output.push('\n');

    for report in [&comparison.left, &comparison.right] {
        output.push_str(&to_markdown(report));
        output.push('\n');
    }
    output
}

fn push_commit_activity(output: &mut String, snapshot: &RepositorySnapshot) {
    let total = snapshot.total_recent_commits();
    if total == 0 {
        output.push_str("No commits in the last 30 days.\n\n");
        return;
    }
    output.push_str(&format!("`{}`\n\n", sparkline(&snapshot.commit_activity)));
    output.push_str(&format!("- Total commits: {}\n", format_count(total)));
    if let Some(busiest) = snapshot
        .commit_activity
        .iter()
        .max_by_key(|day| (day.commits, std::cmp::Reverse(day.date)))
    {
        output.push_str(&format!(
            "- Busiest day: {} ({} commits)\n",
            busiest.date.format("%Y-%m-%d"),
            busiest.commits
        ));
    }
    output.push('\n');
}

fn push_links(output: &mut String, snapshot: &RepositorySnapshot) {
    let links = [
        ("Repository", snapshot.html_url.as_deref()),
        ("Homepage", snapshot.homepage.as_deref()),
        ("Clone URL", snapshot.clone_url.as_deref()),
    ];
    let mut any = false;
    for (label, url) in links {
        if let Some(url) = url {
            output.push_str(&format!("- [{label}]({url})\n"));
            any = true;
        }
    }
    if !any {
        output.push_str("- none\n");
    }
}

/// One block character per day, scaled to the busiest day.
pub fn sparkline(days: &[DailyCommits]) -> String {
    let max = days.iter().map(|day| day.commits).max().unwrap_or(0);
    days.iter()
        .map(|day| {
            if max == 0 {
                return SPARK_LEVELS[0];
            }
            let top = (SPARK_LEVELS.len() - 1) as u128;
            let level = u128::from(day.commits) * top / u128::from(max);
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            output.push(',');
        }
        output.push(digit);
    }
    output
}

fn format_date(value: DateTime<Utc>) -> String {
    value.format("%B %d, %Y").to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn leader_name<'a>(leader: Leader, left: &'a str, right: &'a str) -> &'a str {
    match leader {
        Leader::Left => left,
        Leader::Right => right,
        Leader::Tie => "tie",
    }
}

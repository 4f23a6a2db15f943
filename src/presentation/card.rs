use crate::domain::model::{PlayerRecord, SearchResult, SearchSource};
use colored::Colorize;
use std::fmt::Write;

fn source_indicator(source: SearchSource) -> &'static str {
    match source {
        SearchSource::Cache => "[cache]",
        SearchSource::Local => "[local]",
        SearchSource::Remote => "[live]",
        SearchSource::NotFound => "[not found]",
        SearchSource::RateLimited => "[rate limited]",
        SearchSource::Error => "[error]",
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// Render a search envelope for the terminal: first match as a full profile
/// card, remaining matches as a short list.
pub fn format_result(result: &SearchResult) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{} {}",
        result.parameters.search.bold(),
        source_indicator(result.source).cyan()
    )
    .ok();

    if result.response.is_empty() {
        for error in &result.errors {
            writeln!(output, "  {}", error.red()).ok();
        }
        writeln!(output).ok();
        return output;
    }

    format_player(&mut output, &result.response[0]);

    if result.response.len() > 1 {
        writeln!(output).ok();
        writeln!(output, "  {}", "Other matches".bold()).ok();
        for player in &result.response[1..] {
            let team = player
                .team
                .as_ref()
                .map(|t| t.abbreviation.as_str())
                .unwrap_or("-");
            writeln!(output, "  {:>6}  {} ({})", player.id, player.full_name(), team).ok();
        }
    }

    writeln!(output).ok();
    output
}

fn format_player(output: &mut String, player: &PlayerRecord) {
    let mut header = format!("  {}", player.full_name().green().bold());
    if let Some(jersey) = &player.jersey_number {
        header.push_str(&format!(" {}", format!("#{}", jersey).yellow()));
    }
    writeln!(output).ok();
    writeln!(output, "{}", header).ok();

    if let Some(team) = &player.team {
        writeln!(
            output,
            "  {} • {} {}",
            team.abbreviation.cyan(),
            team.city,
            team.name.as_deref().unwrap_or("")
        )
        .ok();
    }

    writeln!(output).ok();
    writeln!(output, "  {}", "Player Details".bold()).ok();
    writeln!(output, "    Position: {}", or_na(player.position.as_deref())).ok();
    writeln!(output, "    Height:   {}", or_na(player.height.as_deref())).ok();
    let weight = player.weight.as_ref().map(|w| format!("{} lbs", w));
    writeln!(output, "    Weight:   {}", or_na(weight.as_deref())).ok();
    writeln!(output, "    Country:  {}", or_na(player.country.as_deref())).ok();

    if player.college.is_some() || player.draft_year.is_some() {
        writeln!(output).ok();
        writeln!(output, "  {}", "Background".bold()).ok();
        if let Some(college) = &player.college {
            writeln!(output, "    College:  {}", college).ok();
        }
        if let Some(year) = player.draft_year {
            let round = player.draft_round.map(|r| r.to_string());
            let pick = player.draft_number.map(|n| n.to_string());
            writeln!(
                output,
                "    Draft:    {} • Round {} • Pick {}",
                year,
                or_na(round.as_deref()),
                or_na(pick.as_deref())
            )
            .ok();
        }
    }

    if let Some(team) = &player.team {
        writeln!(output).ok();
        writeln!(output, "  {}", "Team Information".bold()).ok();
        writeln!(output, "    Full Name:  {}", team.full_name).ok();
        writeln!(output, "    Conference: {}", team.conference).ok();
        writeln!(output, "    Division:   {}", team.division).ok();
    }
}

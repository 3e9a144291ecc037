//! Terminal rendering for discover results and game pages

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use ctrllog_core::rating::{star_fills, STAR_COUNT};
use ctrllog_core::{DiscoverFilters, DiscoverPage, GameDetail, GameRecord, GenreDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Five-glyph strip: full, partial and empty stars
pub fn render_stars(rating: f64) -> String {
    star_fills(rating)
        .iter()
        .map(|fill| match fill {
            f if *f >= 1.0 => '★',
            f if *f <= 0.0 => '☆',
            _ => '◐',
        })
        .collect()
}

fn game_line(game: &GameRecord) -> String {
    format!(
        "  {:<44} {:>4}  {:<10} {} {:.1}",
        game.title,
        game.release_year,
        game.genre.label(),
        render_stars(game.rating),
        game.rating
    )
}

pub fn write_table<W: Write>(
    out: &mut W,
    page: &DiscoverPage,
    filters: &DiscoverFilters,
    genres: &[GenreDescriptor],
) -> Result<()> {
    if !page.featured.is_empty() {
        writeln!(out, "Featured Games")?;
        for game in &page.featured {
            writeln!(out, "{}", game_line(game))?;
        }
        writeln!(out)?;
    }

    if !page.recommended.is_empty() {
        writeln!(out, "Recommended For You")?;
        for pick in &page.recommended {
            writeln!(out, "{}", game_line(&pick.game))?;
            writeln!(out, "      {}", pick.reason)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Filters: {} | {} | {}{}",
        filters.genre_label(genres),
        filters.year_label(),
        filters.rating_label(),
        if filters.search().trim().is_empty() {
            String::new()
        } else {
            format!(" | \"{}\"", filters.search().trim())
        }
    )?;
    writeln!(out, "{} ({} games)", page.tab.label(), page.results.len())?;

    if page.results.is_empty() {
        writeln!(out, "  No games match these filters.")?;
    }
    for game in &page.results {
        writeln!(out, "{}", game_line(game))?;
    }
    Ok(())
}

pub fn write_detail<W: Write>(out: &mut W, detail: &GameDetail) -> Result<()> {
    let game = &detail.game;
    writeln!(out, "{} ({})", game.title, game.release_year)?;
    writeln!(out, "Genre:     {}", game.genre.label())?;
    if !detail.developer.is_empty() {
        writeln!(out, "Developer: {}", detail.developer)?;
    }
    if !detail.publisher.is_empty() {
        writeln!(out, "Publisher: {}", detail.publisher)?;
    }
    if !detail.platforms.is_empty() {
        writeln!(out, "Platforms: {}", detail.platforms.join(", "))?;
    }
    if !detail.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", detail.description)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Rating: {} {:.1} ({} ratings)",
        render_stars(game.rating),
        game.rating,
        detail.rating_count()
    )?;
    if detail.rating_count() > 0 {
        for stars in (1..=STAR_COUNT).rev() {
            writeln!(
                out,
                "  {} star {:>5.1}%  {}",
                stars,
                detail.ratings.percentage(stars),
                detail.ratings.count(stars)
            )?;
        }
    }

    let stats = &detail.play_stats;
    if stats.total() > 0 {
        writeln!(
            out,
            "Players: {} playing, {} completed, {} dropped, {} wishlisted",
            stats.playing, stats.completed, stats.dropped, stats.wishlisted
        )?;
    }

    if !detail.reviews.is_empty() {
        writeln!(out)?;
        writeln!(out, "Reviews")?;
        for review in detail.top_reviews() {
            writeln!(
                out,
                "  {} {} {} ({} likes)",
                review.author,
                render_stars(f64::from(review.rating)),
                review.date,
                review.likes
            )?;
            writeln!(out, "    {}", review.content)?;
        }
    }

    if !detail.similar.is_empty() {
        writeln!(out)?;
        writeln!(out, "Similar Games")?;
        for similar in &detail.similar {
            writeln!(out, "{}", game_line(similar))?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: u32,
    title: &'a str,
    genre: &'a str,
    release_year: i32,
    rating: f64,
    image_ref: &'a str,
}

pub fn write_csv<W: Write>(out: W, games: &[GameRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for game in games {
        writer.serialize(CsvRow {
            id: game.id,
            title: &game.title,
            genre: game.genre.id(),
            release_year: game.release_year,
            rating: game.rating,
            image_ref: &game.image_ref,
        })?;
    }
    writer.flush()?;
    Ok(())
}

use crate::market::render::{AssetRow, IndexLine, RecommendationLine};
use crate::navigation::Section;
use crate::news::NewsSection;

/// Output surface of both pipelines.
///
/// Render functions take normalized data plus a sink handle instead of
/// touching any global display state, so every cycle is testable headless.
/// Each `update_*` call replaces the previous contents of that view.
pub trait DashboardSink {
    fn update_stock_rows(&mut self, rows: &[AssetRow]);
    fn update_crypto_rows(&mut self, rows: &[AssetRow]);
    fn update_recommendations(&mut self, lines: &[RecommendationLine]);
    fn update_index_lines(&mut self, lines: &[IndexLine]);
    fn update_news(&mut self, sections: &[NewsSection]);
    fn show_news_error(&mut self, message: &str);
    fn show_section(&mut self, section: Section);
}

/// Prints every view to stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn print_rows(title: &str, rows: &[AssetRow], with_cap: bool) {
        println!("\n{}:", title);
        for row in rows {
            if with_cap {
                println!(
                    "  {} | {} | {} | {} | {}",
                    row.name, row.price, row.change, row.market_cap, row.recommendation
                );
            } else {
                println!(
                    "  {} | {} | {} | {}",
                    row.name, row.price, row.change, row.recommendation
                );
            }
        }
    }
}

impl DashboardSink for ConsoleSink {
    fn update_stock_rows(&mut self, rows: &[AssetRow]) {
        Self::print_rows("Actions", rows, false);
    }

    fn update_crypto_rows(&mut self, rows: &[AssetRow]) {
        Self::print_rows("Cryptomonnaies", rows, true);
    }

    fn update_recommendations(&mut self, lines: &[RecommendationLine]) {
        println!("\nRecommandations:");
        for line in lines {
            println!("  {} ({}) : {}", line.name, line.symbol, line.label);
        }
    }

    fn update_index_lines(&mut self, lines: &[IndexLine]) {
        println!("\nIndices & Matières premières:");
        for line in lines {
            let tag = if line.gain { "hausse" } else { "baisse" };
            println!("  {} : {} ({})", line.label, line.change, tag);
        }
    }

    fn update_news(&mut self, sections: &[NewsSection]) {
        for section in sections {
            println!("\n## {}", section.heading);
            for card in &section.cards {
                println!("  - {} ({})", card.title, card.date);
                println!("    {}", card.link);
                println!("    image: {}", card.image_url);
            }
        }
    }

    fn show_news_error(&mut self, message: &str) {
        println!("\n{}", message);
    }

    fn show_section(&mut self, section: Section) {
        let links = [
            Section::Home,
            Section::Markets,
            Section::Crypto,
            Section::News,
        ];
        let bar: Vec<String> = links
            .iter()
            .map(|link| {
                if *link == section {
                    format!("[{}]", link.title())
                } else {
                    link.title().to_string()
                }
            })
            .collect();
        println!("\n{}", bar.join(" | "));
    }
}

// Re-export for tests
#[cfg(test)]
pub use recording::RecordingSink;

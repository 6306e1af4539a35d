use crate::app::{AppContext, Result};
use crate::catalog::{CatalogState, Intent, PageRow};
use crate::cli::ListArgs;
use crate::config::DisplayConfig;
use crate::domain::item::{humanize, STAT_SCALE_MAX};
use crate::domain::Item;

const BAR_WIDTH: usize = 20;

pub async fn list(ctx: &AppContext, display: &DisplayConfig, args: &ListArgs) -> Result<()> {
    let mut state = ctx.load_catalog(display).await?;
    apply_list_args(&mut state, args)?;

    for line in render_page(&state) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, id: u32) -> Result<()> {
    let item = ctx.loader.load_one(id).await?;
    let is_favorite = ctx.load_favorites().is_favorite(id);
    println!("{}", format_detail(&item, is_favorite));
    Ok(())
}

pub fn toggle_favorite(ctx: &AppContext, id: u32) -> Result<()> {
    let mut favorites = ctx.load_favorites();
    if favorites.toggle(id)? {
        println!("Added #{} to favorites", id);
    } else {
        println!("Removed #{} from favorites", id);
    }
    Ok(())
}

pub fn list_favorites(ctx: &AppContext) -> Result<()> {
    let ids = ctx.load_favorites().ids();
    if ids.is_empty() {
        println!("No favorites");
        return Ok(());
    }

    for id in ids {
        println!("#{}", id);
    }
    Ok(())
}

/// Turns command-line filters into intents, in the same order the TUI
/// would apply them.
pub fn apply_list_args(state: &mut CatalogState, args: &ListArgs) -> Result<()> {
    if let Some(query) = &args.query {
        state.apply(Intent::SetText(query.clone()))?;
    }
    for category in &args.categories {
        let category = category.trim().to_lowercase();
        if !state.filters().categories.contains(&category) {
            state.apply(Intent::ToggleCategory(category))?;
        }
    }
    state.apply(Intent::SetGeneration(args.generation))?;
    state.apply(Intent::SetSort(args.sort))?;
    if args.favorites != state.filters().favorites_only {
        state.apply(Intent::ToggleFavoritesOnly)?;
    }
    if let Some(size) = args.page_size {
        state.apply(Intent::SetPageSize(size))?;
    }
    state.apply(Intent::GoToPage(args.page))
}

pub fn render_page(state: &CatalogState) -> Vec<String> {
    let view = state.view();
    if view.rows.is_empty() {
        return vec!["No matches".to_string()];
    }

    let mut lines: Vec<String> = view.rows.iter().map(format_row).collect();
    lines.push(String::new());
    lines.push(view.page.summary());
    lines
}

pub fn format_row(row: &PageRow<'_>) -> String {
    let marker = if row.is_favorite { "★" } else { " " };
    format!(
        "{} #{:<5} {:<14} {:<18} {:.1} m · {:.1} kg",
        marker,
        row.item.id,
        row.item.display_name(),
        row.item.categories.join("/"),
        row.item.height,
        row.item.weight
    )
}

pub fn format_detail(item: &Item, is_favorite: bool) -> String {
    let mut out = format!("#{} {}", item.id, item.display_name());
    if is_favorite {
        out.push_str(" ★");
    }
    out.push('\n');
    out.push_str(&format!("Types:     {}\n", item.categories.join(", ")));
    out.push_str(&format!("Height:    {:.1} m\n", item.height));
    out.push_str(&format!("Weight:    {:.1} kg\n", item.weight));

    let abilities: Vec<String> = item.abilities.iter().map(|a| humanize(a)).collect();
    out.push_str(&format!("Abilities: {}\n", abilities.join(", ")));

    if !item.stats.is_empty() {
        out.push_str(&format!("Stats (of {}):\n", STAT_SCALE_MAX));
        for stat in &item.stats {
            let filled = (stat.ratio() * BAR_WIDTH as f64).round() as usize;
            out.push_str(&format!(
                "  {:<16}{:>4} {}{}\n",
                humanize(&stat.name),
                stat.value,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled)
            ));
        }
    }

    if item.has_image() {
        out.push_str(&format!("Image:     {}\n", item.image));
    }
    out.trim_end().to_string()
}

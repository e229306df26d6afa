//! Status renderer: lays a snapshot out into fixed-width text rows.

use crate::config::{Align, Row, StatusConfig, TemplateBlock};
use crate::error::Result;
use crate::models::PlayerSnapshot;

mod context;
mod cycle;

use context::Context;
pub use context::format_seconds;

/// Render every template row. `cycle` drives the scrolling of shortened
/// blocks and is owned by the caller.
pub fn render(snapshot: &PlayerSnapshot, config: &StatusConfig, cycle: u64) -> Result<Vec<String>> {
    let context = Context::new(snapshot, config)?;

    Ok(config
        .template
        .iter()
        .map(|row| render_row(row, &context, config, cycle))
        .collect())
}

fn render_row(row: &Row, context: &Context, config: &StatusConfig, cycle: u64) -> String {
    let blocks = row.blocks();
    block_widths(blocks, config.width)
        .into_iter()
        .zip(blocks)
        .map(|(width, block)| {
            render_block(block, width, context, config.initial_cycle_pause, cycle)
        })
        .collect()
}

/// Blocks without a width share what the fixed-width ones leave over. The
/// last flexible block takes the remainder of the division.
fn block_widths(blocks: &[TemplateBlock], row_width: usize) -> Vec<usize> {
    let fixed: usize = blocks.iter().filter_map(|b| b.width).sum();
    let flexible = blocks.iter().filter(|b| b.width.is_none()).count();
    let Some(last_flexible) = blocks.iter().rposition(|b| b.width.is_none()) else {
        return blocks.iter().filter_map(|b| b.width).collect();
    };

    let available = row_width.saturating_sub(fixed);
    let share = available / flexible;
    let remainder = available % flexible;

    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| match block.width {
            Some(width) => width,
            None if i == last_flexible => share + remainder,
            None => share,
        })
        .collect()
}

fn render_block(
    block: &TemplateBlock,
    width: usize,
    context: &Context,
    pause: u64,
    cycle: u64,
) -> String {
    let mut text = context.substitute(&block.content);
    if block.shorten && text.chars().count() > width {
        text = cycle::shorten(&text, width, pause, cycle);
    }
    align(&text, width, block.align)
}

/// Pad `text` to `width` chars. Center puts the odd space on the right. Text
/// without an alignment, or already wider than `width`, is returned as is.
pub fn align(text: &str, width: usize, align: Option<Align>) -> String {
    let Some(align) = align else {
        return text.to_string();
    };

    let padding = width.saturating_sub(text.chars().count());
    let (left, right) = match align {
        Align::Left => (0, padding),
        Align::Right => (padding, 0),
        Align::Center => (padding / 2, padding - padding / 2),
    };

    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

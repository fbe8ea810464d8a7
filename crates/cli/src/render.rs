//! Text and JSON rendering of the derived views.
//!
//! Everything writes to a caller-supplied `io::Write` so output can go to
//! stdout or be captured in tests.

use std::io::{self, Write};

use toko_core::{CartDetail, FilterCriteria, Product, VisibleProducts};

/// Write the product list with its count header.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn products(
    out: &mut impl Write,
    criteria: &FilterCriteria,
    visible: &VisibleProducts<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "{} produk (kategori: {}, urutan: {}{})",
        visible.len(),
        criteria.category,
        criteria.sort,
        if criteria.query.is_empty() {
            String::new()
        } else {
            format!(", cari: \"{}\"", criteria.query)
        }
    )?;
    for product in visible.iter() {
        product_row(out, product)?;
    }
    Ok(())
}

fn product_row(out: &mut impl Write, product: &Product) -> io::Result<()> {
    write!(
        out,
        "  {:<4} {:<28} {:>12}  * {:.1}  [{}]",
        product.id, product.name, product.price, product.rating, product.category
    )?;
    if !product.tags.is_empty() {
        write!(out, "  {}", product.tags.join(", "))?;
    }
    writeln!(out)
}

/// Write the product list as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization or the writer fails.
pub fn products_json(out: &mut impl Write, visible: &VisibleProducts<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, visible.as_slice())?;
    writeln!(out)
}

/// Write the cart drawer: lines, badge count and subtotal.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn cart(out: &mut impl Write, detail: &CartDetail<'_>) -> io::Result<()> {
    writeln!(out, "Keranjang ({})", detail.item_count())?;
    if detail.is_empty() {
        return writeln!(out, "  Keranjang masih kosong.");
    }
    for line in detail.lines() {
        writeln!(
            out,
            "  {:<4} {:<28} {:>3} x {:>12} = {:>14}",
            line.product.id, line.product.name, line.quantity, line.product.price, line.line_total
        )?;
    }
    writeln!(out, "  {:<52} {:>14}", "Subtotal", detail.subtotal())
}

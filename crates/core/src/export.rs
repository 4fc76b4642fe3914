//! Raster and PDF export of the grid view.
//!
//! The raster is drawn at twice the nominal cell size: header band, hour
//! column, grid lines and one filled block per assigned cell in the course
//! color. The PDF export embeds that raster as the only content of a single
//! landscape page sized to the raster's pixel dimensions.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};

use crate::errors::{TimetableError, TimetableResult};
use crate::grid::GridView;

pub const PNG_FILENAME: &str = "my-timetable.png";
pub const PDF_FILENAME: &str = "my-timetable.pdf";

const SCALE: u32 = 2;
const TIME_COLUMN_WIDTH: u32 = 90;
const DAY_COLUMN_WIDTH: u32 = 140;
const HEADER_HEIGHT: u32 = 44;
const ROW_HEIGHT: u32 = 60;
const CELL_PADDING: u32 = 4;
const LINE_WIDTH: u32 = 1;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HEADER_FILL: Rgba<u8> = Rgba([243, 244, 246, 255]);
const TIME_COLUMN_FILL: Rgba<u8> = Rgba([249, 250, 251, 255]);
const GRID_LINE: Rgba<u8> = Rgba([209, 213, 219, 255]);

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(image.width());
    let y_end = (y + height).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}

/// Rasterises the grid. Fails when the view has no days or no rows.
pub fn render_raster(grid: &GridView) -> TimetableResult<RgbaImage> {
    if grid.days.is_empty() || grid.rows.is_empty() {
        return Err(TimetableError::NotFound("Timetable grid not found".to_string()));
    }

    let columns = grid.days.len() as u32;
    let rows = grid.rows.len() as u32;
    let width = (TIME_COLUMN_WIDTH + columns * DAY_COLUMN_WIDTH) * SCALE;
    let height = (HEADER_HEIGHT + rows * ROW_HEIGHT) * SCALE;

    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);
    fill_rect(&mut image, 0, 0, width, HEADER_HEIGHT * SCALE, HEADER_FILL);
    fill_rect(
        &mut image,
        0,
        HEADER_HEIGHT * SCALE,
        TIME_COLUMN_WIDTH * SCALE,
        height,
        TIME_COLUMN_FILL,
    );

    for (row_index, row) in grid.rows.iter().enumerate() {
        let top = (HEADER_HEIGHT + row_index as u32 * ROW_HEIGHT) * SCALE;
        for cell in &row.cells {
            let (Some(course), Some(column)) = (
                &cell.course,
                grid.days.iter().position(|day| *day == cell.day),
            ) else {
                continue;
            };
            let left = (TIME_COLUMN_WIDTH + column as u32 * DAY_COLUMN_WIDTH) * SCALE;
            let [r, g, b] = course.color.rgb();
            fill_rect(
                &mut image,
                left + CELL_PADDING * SCALE,
                top + CELL_PADDING * SCALE,
                (DAY_COLUMN_WIDTH - 2 * CELL_PADDING) * SCALE,
                (ROW_HEIGHT - 2 * CELL_PADDING) * SCALE,
                Rgba([r, g, b, 255]),
            );
        }
    }

    for column in 0..=columns {
        let x = (TIME_COLUMN_WIDTH + column * DAY_COLUMN_WIDTH) * SCALE;
        fill_rect(&mut image, x.min(width - LINE_WIDTH * SCALE), 0, LINE_WIDTH * SCALE, height, GRID_LINE);
    }
    for row in 0..=rows {
        let y = (HEADER_HEIGHT + row * ROW_HEIGHT) * SCALE;
        fill_rect(&mut image, 0, y.min(height - LINE_WIDTH * SCALE), width, LINE_WIDTH * SCALE, GRID_LINE);
    }

    Ok(image)
}

pub fn export_png(grid: &GridView) -> TimetableResult<Vec<u8>> {
    let image = render_raster(grid)?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| TimetableError::Internal(Box::new(e)))?;
    Ok(bytes)
}

pub fn export_pdf(grid: &GridView) -> TimetableResult<Vec<u8>> {
    let image = render_raster(grid)?;
    let (width, height) = image.dimensions();
    let rgb: Vec<u8> = image
        .pixels()
        .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
        .collect();

    Ok(single_image_pdf(width, height, &rgb))
}

/// One landscape page whose only content is an uncompressed RGB image.
fn single_image_pdf(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let image_id = Ref::new(5);
    let image_name = Name(b"Im0");

    // Landscape: the longer side is the page width.
    let page_width = width.max(height) as f32;
    let page_height = width.min(height) as f32;

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut xobject = pdf.image_xobject(image_id, rgb);
    xobject.width(width as i32);
    xobject.height(height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    xobject.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([
        width as f32,
        0.0,
        0.0,
        height as f32,
        0.0,
        (page_height - height as f32).max(0.0),
    ]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

//! Delta-T spray-condition chart.
//!
//! Delta-T is the gap between dry-bulb and wet-bulb temperature and is the
//! usual go/no-go indicator for spraying: 2–8 °C is the good window, just
//! outside it is marginal, 10 °C and up is evaporation-prone. The chart plots
//! that field over temperature (x, 0–50 °C) and relative humidity
//! (y, 10–100 %) and marks the reading taken during the application.
//!
//! Only the plot area is rasterized. Title, axis labels and the contour
//! legend belong to the HTML template around the image.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::error::ChartError;

/// Width and height of the chart in pixels.
pub const SIZE: u32 = 630;

pub const TEMP_RANGE: (f64, f64) = (0.0, 50.0);
pub const RH_RANGE: (f64, f64) = (10.0, 100.0);

const AMBER: Rgb<u8> = hex(0xFFC825);
const GREEN: Rgb<u8> = hex(0x2F963A);
const RED: Rgb<u8> = hex(0xF66139);
const BLACK: Rgb<u8> = hex(0x000000);
const WHITE: Rgb<u8> = hex(0xFFFFFF);

/// Contour levels (°C) and their line colours.
pub const CONTOURS: [(f64, Rgb<u8>); 10] = [
    (2.0, hex(0x000000)),
    (4.0, hex(0x000000)),
    (6.0, hex(0xFF6B35)),
    (8.0, hex(0x1F78B4)),
    (10.0, hex(0x000000)),
    (12.0, hex(0x8B4513)),
    (14.0, hex(0x9B59B6)),
    (16.0, hex(0x5A6C7D)),
    (18.0, hex(0x6B3410)),
    (20.0, hex(0x000000)),
];

const GRID_TEMP_STEP: f64 = 5.0;
const GRID_RH_STEP: f64 = 10.0;
const FRAME_PX: u32 = 2;
const MARKER_RADIUS: i32 = 7;
const MARKER_RIM: i32 = 2;

const fn hex(rgb: u32) -> Rgb<u8> {
    Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}

/// Wet-bulb temperature (°C) from air temperature (°C) and relative
/// humidity (%), after Stull (2011).
pub fn wet_bulb(temp: f64, rh: f64) -> f64 {
    temp * (0.151977 * (rh + 8.313659).sqrt()).atan() + (temp + rh).atan() - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

/// Dry-bulb minus wet-bulb temperature.
pub fn delta_t(temp: f64, rh: f64) -> f64 {
    temp - wet_bulb(temp, rh)
}

/// Band colour for a Delta-T value.
pub fn band_color(dt: f64) -> Rgb<u8> {
    if dt < 2.0 {
        AMBER
    } else if dt < 8.0 {
        GREEN
    } else if dt < 10.0 {
        AMBER
    } else {
        RED
    }
}

/// Pixel column of a temperature.
pub fn x_of(temp: f64) -> f64 {
    (temp - TEMP_RANGE.0) / (TEMP_RANGE.1 - TEMP_RANGE.0) * f64::from(SIZE)
}

/// Pixel row of a relative humidity (top is 100 %).
pub fn y_of(rh: f64) -> f64 {
    (RH_RANGE.1 - rh) / (RH_RANGE.1 - RH_RANGE.0) * f64::from(SIZE)
}

fn temp_at(px: u32) -> f64 {
    TEMP_RANGE.0 + (f64::from(px) + 0.5) / f64::from(SIZE) * (TEMP_RANGE.1 - TEMP_RANGE.0)
}

fn rh_at(py: u32) -> f64 {
    RH_RANGE.1 - (f64::from(py) + 0.5) / f64::from(SIZE) * (RH_RANGE.1 - RH_RANGE.0)
}

/// Renders the chart as PNG bytes, marking the reading when both values are
/// present and inside the plotted ranges.
pub fn render_delta_t_png(
    temperature: Option<f64>,
    humidity: Option<f64>,
) -> Result<Vec<u8>, ChartError> {
    let img = render_delta_t(temperature, humidity);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    let bytes = out.into_inner();
    debug!(bytes = bytes.len(), ?temperature, ?humidity, "delta_t_chart_rendered");
    Ok(bytes)
}

/// [`render_delta_t_png`] as a `data:image/png;base64,...` URI.
pub fn delta_t_data_uri(
    temperature: Option<f64>,
    humidity: Option<f64>,
) -> Result<String, ChartError> {
    let png = render_delta_t_png(temperature, humidity)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Rasterizes the chart without encoding it.
pub fn render_delta_t(temperature: Option<f64>, humidity: Option<f64>) -> RgbImage {
    let field: Vec<f64> = (0..SIZE)
        .flat_map(|py| (0..SIZE).map(move |px| delta_t(temp_at(px), rh_at(py))))
        .collect();
    let at = |px: u32, py: u32| field[(py * SIZE + px) as usize];

    let mut img = RgbImage::from_fn(SIZE, SIZE, |px, py| band_color(at(px, py)));

    draw_grid(&mut img);

    for py in 0..SIZE {
        for px in 0..SIZE {
            let here = at(px, py);
            let right = (px + 1 < SIZE).then(|| at(px + 1, py));
            let below = (py + 1 < SIZE).then(|| at(px, py + 1));
            for (level, color) in CONTOURS {
                let crosses = |other: Option<f64>| {
                    other.is_some_and(|o| (here - level).signum() != (o - level).signum())
                };
                if crosses(right) || crosses(below) {
                    img.put_pixel(px, py, color);
                    break;
                }
            }
        }
    }

    draw_frame(&mut img);

    if let (Some(t), Some(rh)) = (temperature, humidity) {
        let in_range = (TEMP_RANGE.0..=TEMP_RANGE.1).contains(&t)
            && (RH_RANGE.0..=RH_RANGE.1).contains(&rh);
        if in_range {
            let center = (x_of(t).round() as i32, y_of(rh).round() as i32);
            draw_filled_circle_mut(&mut img, center, MARKER_RADIUS, BLACK);
            draw_filled_circle_mut(&mut img, center, MARKER_RADIUS - MARKER_RIM, WHITE);
        } else {
            debug!(temperature = t, humidity = rh, "reading outside chart range, not marked");
        }
    }

    img
}

fn draw_grid(img: &mut RgbImage) {
    let mut temp = TEMP_RANGE.0 + GRID_TEMP_STEP;
    while temp < TEMP_RANGE.1 {
        let px = x_of(temp).round() as u32;
        for py in 0..SIZE {
            img.put_pixel(px.min(SIZE - 1), py, BLACK);
        }
        temp += GRID_TEMP_STEP;
    }

    let mut rh = RH_RANGE.0 + GRID_RH_STEP;
    while rh < RH_RANGE.1 {
        let py = y_of(rh).round() as u32;
        for px in 0..SIZE {
            img.put_pixel(px, py.min(SIZE - 1), BLACK);
        }
        rh += GRID_RH_STEP;
    }
}

fn draw_frame(img: &mut RgbImage) {
    for i in 0..SIZE {
        for d in 0..FRAME_PX {
            img.put_pixel(i, d, BLACK);
            img.put_pixel(i, SIZE - 1 - d, BLACK);
            img.put_pixel(d, i, BLACK);
            img.put_pixel(SIZE - 1 - d, i, BLACK);
        }
    }
}

//! Gráfico de torta de créditos en SVG.
//!
//! Las porciones se dibujan como polígonos y las etiquetas como `Text`; el
//! backend SVG escribe el texto tal cual, sin medirlo, así que no depende de
//! las fuentes instaladas.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

use crate::aggregate::PieSlice;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { title: "Credits".to_string(), width: 640, height: 480 }
    }
}

/// Colores de respaldo cuando el dato no trae un hex válido
const FALLBACK_PALETTE: [RGBColor; 6] = [
    RGBColor(59, 130, 246),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(236, 72, 153),
    RGBColor(139, 92, 246),
    RGBColor(100, 116, 139),
];

/// Segmentos por vuelta completa
const ARC_STEPS: f64 = 360.0;

/// `#rrggbb` (o `rrggbb`) a color.
pub fn parse_hex_color(s: &str) -> Option<RGBColor> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn point_at(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Polígono de una porción entre `start` y `end` (radianes, sentido horario
/// en pantalla).
fn wedge(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / (2.0 * PI)) * ARC_STEPS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let a = start + (end - start) * (i as f64 / steps as f64);
        points.push(point_at(center, radius, a));
    }
    points
}

/// Dibuja las porciones como un SVG. Sin créditos se dibuja sólo el aviso.
pub fn render_pie_svg(slices: &[PieSlice], options: &ChartOptions) -> Result<String> {
    let render_err = |e: &dyn std::fmt::Display| Error::Render(e.to_string());

    let slices: Vec<&PieSlice> = slices.iter().filter(|s| s.value > 0.0).collect();
    let total: f64 = slices.iter().map(|s| s.value).sum();

    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_err(&e))?;

        let title_style = TextStyle::from(("sans-serif", 22).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(options.title.as_str(), ((options.width / 2) as i32, 10), title_style))
            .map_err(|e| render_err(&e))?;

        let center = ((options.width / 2) as i32, (options.height / 2) as i32 + 16);
        if total <= 0.0 {
            let style = TextStyle::from(("sans-serif", 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new("No credits to display", center, style))
                .map_err(|e| render_err(&e))?;
        } else {
            let radius = f64::from(options.width.min(options.height)) * 0.3;
            let mut start = -PI / 2.0;
            for (i, s) in slices.iter().enumerate() {
                let color = parse_hex_color(&s.color).unwrap_or(FALLBACK_PALETTE[i % FALLBACK_PALETTE.len()]);
                let sweep = 2.0 * PI * s.value / total;
                let end = start + sweep;
                root.draw(&Polygon::new(wedge(center, radius, start, end), color.filled()))
                    .map_err(|e| render_err(&e))?;

                let mid = start + sweep / 2.0;
                let h = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
                let label_style = TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(h, VPos::Center));
                let label = format!("{} ({}, {:.0}%)", s.label, s.value, 100.0 * s.value / total);
                root.draw(&Text::new(label, point_at(center, radius + 14.0, mid), label_style))
                    .map_err(|e| render_err(&e))?;
                start = end;
            }
        }
        root.present().map_err(|e| render_err(&e))?;
    }
    Ok(out)
}

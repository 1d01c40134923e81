use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui, Vec2};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::color::{bupu, region_color, ColorMap};
use crate::dashboard::panels::{BarPanel, HeatmapPanel, ScatterPanel, ViolinPanel};
use crate::data::model::Region;
use crate::views::bar::{ANNOTATION, COUNT_LABEL};
use crate::views::heatmap::VALUE_LABEL;
use crate::views::scale::{log_axis_label, log_tick_label, thousands};

const BAR_COLOR: Color32 = Color32::from_rgb(0x88, 0x41, 0x9d);
const COLORBAR_WIDTH: f32 = 170.0;

/// Grid steps for categorical axes: marks only on integer positions.
const CATEGORY_STEPS: [f64; 3] = [1.0, 10.0, 100.0];

/// Label of the category at integer position `x`, blank between categories.
fn category_label(labels: &[String], x: f64) -> String {
    if (x - x.round()).abs() > 1e-9 || x < 0.0 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bar chart: registrations per model year
// ---------------------------------------------------------------------------

/// Bars are drawn at `log10(count)` with decade labels, so one unit on the
/// y axis is a tenfold increase.
pub fn bar_plot(ui: &mut Ui, panel: &BarPanel, size: Vec2) {
    ui.strong("Number of Registered EVs in WA Per Model Year");

    let axes = panel.axes;
    let bars: Vec<Bar> = panel
        .counts
        .iter()
        .map(|c| {
            Bar::new(c.year as f64, (c.vehicles as f64).log10())
                .width(0.8)
                .name(format!("{}: {}", c.year, thousands(c.vehicles as u64)))
        })
        .collect();

    Plot::new("bar_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Model Year")
        .y_axis_label("Number of Registered EVs (Log Scale)")
        .y_axis_formatter(|mark, _range| log_axis_label(mark.value))
        .y_grid_spacer(uniform_grid_spacer(|_| CATEGORY_STEPS))
        .show_grid(true)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [axes.x.0, axes.y.0.log10()],
                [axes.x.1, axes.y.1.log10()],
            ));
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(COUNT_LABEL));

            let [x, y] = axes.annotation_at;
            plot_ui.text(
                Text::new(PlotPoint::new(x, y.log10()), RichText::new(ANNOTATION).size(13.0))
                    .anchor(Align2::LEFT_CENTER)
                    .color(Color32::BLACK),
            );
        });
}

// ---------------------------------------------------------------------------
// Jittered scatter: range by EV type
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, panel: &ScatterPanel, size: Vec2) {
    ui.strong("Range Comparison for Battery Electric and Plug-in Hybrid Vehicles");

    let types = panel.axis.labels().len();
    let colors = ColorMap::new(types);
    let categories = types.max(1) as f64;
    let (y_lo, y_hi) = panel.axes.y;

    let mut by_type: Vec<Vec<[f64; 2]>> = vec![Vec::new(); types];
    for p in &panel.points {
        if let Some(series) = by_type.get_mut(p.ev_type as usize) {
            series.push([p.x, p.range]);
        }
    }

    let axis = panel.axis.clone();
    Plot::new("scatter_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("Electric Vehicle Type")
        .y_axis_label("Electric Range (mi)")
        .x_axis_formatter(move |mark, _range| {
            axis.label_at(mark.value).unwrap_or_default().to_string()
        })
        .x_grid_spacer(uniform_grid_spacer(|_| CATEGORY_STEPS))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.5, y_lo],
                [categories - 0.5, y_hi],
            ));
            for (code, series) in by_type.into_iter().enumerate() {
                plot_ui.points(
                    Points::new(PlotPoints::new(series))
                        .radius(2.0)
                        .color(colors.color_for(code as u32))
                        .name(panel.axis.label_at(code as f64).unwrap_or_default()),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap: top counties × region
// ---------------------------------------------------------------------------

pub fn heatmap_plot(ui: &mut Ui, panel: &HeatmapPanel, size: Vec2, jurisdiction: &str) {
    ui.strong(format!(
        "Top {} {jurisdiction} Counties: EVs Registered by Car Origin (Log Scale)",
        panel.top.counties.len()
    ));

    if panel.top.counties.is_empty() {
        ui.label(format!("No registrations found in {jurisdiction}."));
        return;
    }

    // Highest-ranked county at the top of the grid.
    let counties = &panel.top.counties;
    let rows = counties.len();
    let row_of = |county: &str| {
        counties
            .iter()
            .position(|c| c == county)
            .map(|i| (rows - 1 - i) as f64)
    };
    let y_labels: Vec<String> = counties.iter().rev().cloned().collect();
    let x_labels: Vec<String> = Region::ALL.iter().map(|r| r.label().to_string()).collect();
    let scale = panel.scale;
    let text_color = ui.visuals().text_color();

    ui.horizontal(|ui: &mut Ui| {
        Plot::new("heatmap_plot")
            .width((size.x - COLORBAR_WIDTH).max(200.0))
            .height(size.y)
            .x_axis_label("EV Car Model Origin")
            .y_axis_label("Washington State County")
            .x_axis_formatter(move |mark, _range| category_label(&x_labels, mark.value))
            .y_axis_formatter(move |mark, _range| category_label(&y_labels, mark.value))
            .x_grid_spacer(uniform_grid_spacer(|_| CATEGORY_STEPS))
            .y_grid_spacer(uniform_grid_spacer(|_| CATEGORY_STEPS))
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [-0.5, -0.5],
                    [Region::ALL.len() as f64 - 0.5, rows as f64 - 0.5],
                ));
                for cell in &panel.cells {
                    let Some(y) = row_of(&cell.county) else {
                        continue;
                    };
                    let x = cell.region.index() as f64;
                    let fill = scale
                        .and_then(|s| s.normalize(cell.vehicles as f64))
                        .map(bupu)
                        .unwrap_or(Color32::TRANSPARENT);
                    let square = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(square))
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(format!("{} / {}", cell.county, cell.region)),
                    );
                    let ink = ink_for(fill, text_color);
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), thousands(cell.vehicles as u64)).color(ink),
                    );
                }
            });

        color_bar(ui, panel, size.y);
    });
}

/// Readable label colour on top of a heatmap cell.
fn ink_for(fill: Color32, default: Color32) -> Color32 {
    if fill.a() == 0 {
        return default;
    }
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma < 128.0 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

/// Vertical BuPu strip labelled at the configured reference counts.
fn color_bar(ui: &mut Ui, panel: &HeatmapPanel, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(COLORBAR_WIDTH, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    painter.text(
        rect.left_top() + egui::vec2(0.0, 4.0),
        Align2::LEFT_TOP,
        "Raw Number of EVs (w/ Log Scale)",
        egui::FontId::proportional(11.0),
        text_color,
    );

    let strip = egui::Rect::from_min_max(
        rect.left_top() + egui::vec2(4.0, 24.0),
        egui::pos2(rect.left() + 20.0, rect.bottom() - 8.0),
    );
    const SLICES: usize = 64;
    let slice_h = strip.height() / SLICES as f32;
    for i in 0..SLICES {
        let t = i as f64 / (SLICES - 1) as f64;
        let top = strip.bottom() - (i + 1) as f32 * slice_h;
        let slice = egui::Rect::from_min_max(
            egui::pos2(strip.left(), top),
            egui::pos2(strip.right(), top + slice_h + 0.5),
        );
        painter.rect_filled(slice, 0.0, bupu(t));
    }

    let Some(scale) = panel.scale else {
        return;
    };
    for &tick in panel.color_ticks.iter().filter(|t| scale.covers(**t)) {
        let Some(t) = scale.normalize(tick) else {
            continue;
        };
        let y = strip.bottom() - t as f32 * strip.height();
        painter.line_segment(
            [egui::pos2(strip.right(), y), egui::pos2(strip.right() + 4.0, y)],
            Stroke::new(1.0, text_color),
        );
        painter.text(
            egui::pos2(strip.right() + 6.0, y),
            Align2::LEFT_CENTER,
            log_tick_label(tick),
            egui::FontId::proportional(11.0),
            text_color,
        );
    }
    painter.text(
        rect.left_bottom(),
        Align2::LEFT_BOTTOM,
        VALUE_LABEL,
        egui::FontId::proportional(9.0),
        text_color,
    );
}

// ---------------------------------------------------------------------------
// Violin: range distribution by region
// ---------------------------------------------------------------------------

const VIOLIN_HALF_WIDTH: f64 = 0.4;

pub fn violin_plot(ui: &mut Ui, panel: &ViolinPanel, size: Vec2) {
    ui.strong("Electric Range by EV Regional Origin");

    let labels: Vec<String> = panel.shapes.iter().map(|s| s.region.label().to_string()).collect();
    let groups = labels.len().max(1) as f64;
    let (y_lo, y_hi) = panel.window;

    Plot::new("violin_plot")
        .width(size.x)
        .height(size.y)
        .x_axis_label("EV Regional Origin")
        .y_axis_label("EV Range (Mi)")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .x_grid_spacer(uniform_grid_spacer(|_| CATEGORY_STEPS))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.6, y_lo],
                [groups - 0.4, y_hi],
            ));

            for (i, shape) in panel.shapes.iter().enumerate() {
                let x = i as f64;
                let color = region_color(shape.region);

                if shape.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(vec![
                            [x - VIOLIN_HALF_WIDTH, shape.median],
                            [x + VIOLIN_HALF_WIDTH, shape.median],
                        ]))
                        .color(color)
                        .width(2.0)
                        .name(shape.region.label()),
                    );
                    continue;
                }

                // Density outlines are not convex; fill slice by slice.
                for pair in shape.density.windows(2) {
                    let ((y0, d0), (y1, d1)) = (pair[0], pair[1]);
                    let (w0, w1) = (d0 * VIOLIN_HALF_WIDTH, d1 * VIOLIN_HALF_WIDTH);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(vec![
                            [x - w0, y0],
                            [x + w0, y0],
                            [x + w1, y1],
                            [x - w1, y1],
                        ]))
                        .fill_color(color.gamma_multiply(0.8))
                        .stroke(Stroke::NONE),
                    );
                }

                let mut outline: Vec<[f64; 2]> = shape
                    .density
                    .iter()
                    .map(|(y, d)| [x - d * VIOLIN_HALF_WIDTH, *y])
                    .collect();
                outline.extend(
                    shape
                        .density
                        .iter()
                        .rev()
                        .map(|(y, d)| [x + d * VIOLIN_HALF_WIDTH, *y]),
                );
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
                plot_ui.line(
                    Line::new(PlotPoints::new(outline))
                        .color(Color32::DARK_GRAY)
                        .width(1.0)
                        .name(format!("{} (n = {})", shape.region, thousands(shape.samples as u64))),
                );

                // Inner box: interquartile range plus median tick.
                let box_w = 0.04;
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(vec![
                        [x - box_w, shape.q1],
                        [x + box_w, shape.q1],
                        [x + box_w, shape.q3],
                        [x - box_w, shape.q3],
                    ]))
                    .fill_color(Color32::from_gray(40))
                    .stroke(Stroke::NONE),
                );
                plot_ui.line(
                    Line::new(PlotPoints::new(vec![
                        [x - box_w, shape.median],
                        [x + box_w, shape.median],
                    ]))
                    .color(Color32::WHITE)
                    .width(2.0),
                );
            }
        });
}

//! Impact heatmap overlay
//!
//! Turns the impact history into draw commands: a glow per impact, the
//! legend bar with its labels, the running impact count and the grid of
//! "future risk" cells. Rendering is a pure function of the history and the
//! canvas size.

use meteor_engine::foundation::math::{Rgba, Vec2};
use meteor_engine::render::{ColorStop, DrawCommand, Paint};

use crate::components::Impact;
use crate::config::HeatmapConfig;

const LEGEND_LABEL_PX: f32 = 14.0;
const TOTAL_LABEL_PX: f32 = 18.0;

/// Impact counts bucketed into square cells
#[derive(Debug, Clone, PartialEq)]
pub struct RiskGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    risk_divisor: f32,
    risk_cap: f32,
    // Column-major: index = col * rows + row
    counts: Vec<u32>,
}

impl RiskGrid {
    /// Bucket `impacts` with the default cell size and opacity curve
    pub fn from_impacts(impacts: &[Impact], width: f32, height: f32) -> Self {
        Self::with_config(&HeatmapConfig::default(), impacts, width, height)
    }

    /// Bucket `impacts` using the given heatmap settings
    ///
    /// Impacts with a negative coordinate or past the last cell are ignored.
    pub fn with_config(config: &HeatmapConfig, impacts: &[Impact], width: f32, height: f32) -> Self {
        let cell_size = config.cell_size;
        let cols = (width / cell_size).ceil().max(0.0) as usize;
        let rows = (height / cell_size).ceil().max(0.0) as usize;

        let mut grid = Self {
            cell_size,
            cols,
            rows,
            risk_divisor: config.risk_divisor,
            risk_cap: config.risk_cap,
            counts: vec![0; cols * rows],
        };

        for impact in impacts {
            let col = (impact.position.x / cell_size).floor();
            let row = (impact.position.y / cell_size).floor();
            if col < 0.0 || row < 0.0 {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            if let Some(index) = grid.index(col, row) {
                grid.counts[index] += 1;
            }
        }
        grid
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.cols && row < self.rows).then_some(col * self.rows + row)
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Impacts recorded in a cell (zero outside the grid)
    pub fn count(&self, col: usize, row: usize) -> u32 {
        self.index(col, row).map_or(0, |i| self.counts[i])
    }

    /// Overlay opacity for a cell: `min(count / divisor, cap)`
    pub fn opacity(&self, col: usize, row: usize) -> f32 {
        (self.count(col, row) as f32 / self.risk_divisor).min(self.risk_cap)
    }

    /// Non-empty cells in column-major order as `(col, row, count)`
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(i, count)| (i / self.rows, i % self.rows, *count))
    }

    /// Top-left corner of a cell in canvas pixels
    pub fn cell_origin(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(col as f32 * self.cell_size, row as f32 * self.cell_size)
    }
}

/// Builds the heatmap layer
#[derive(Debug, Clone, Default)]
pub struct HeatmapRenderer {
    config: HeatmapConfig,
}

impl HeatmapRenderer {
    /// Create a renderer with the given settings
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    /// Draw commands for the whole overlay
    ///
    /// Order: impact glows, legend bar, legend labels, total count, risk cells.
    pub fn render(&self, impacts: &[Impact], width: f32, height: f32) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(impacts.len() + 8);

        commands.extend(impacts.iter().map(|impact| self.glow(impact.position)));
        commands.extend(self.legend(impacts.len()));

        let grid = RiskGrid::with_config(&self.config, impacts, width, height);
        let cell = Vec2::new(grid.cell_size, grid.cell_size);
        commands.extend(grid.cells().map(|(col, row, _)| DrawCommand::FillRect {
            origin: grid.cell_origin(col, row),
            size: cell,
            paint: Paint::Solid(Rgba::RED.with_alpha(grid.opacity(col, row))),
        }));

        commands
    }

    fn glow(&self, center: Vec2) -> DrawCommand {
        DrawCommand::FillCircle {
            center,
            radius: self.config.glow_radius,
            paint: Paint::RadialGradient {
                center,
                radius: self.config.glow_radius,
                stops: vec![
                    ColorStop::new(0.0, Rgba::new(255, 0, 0, 0.6)),
                    ColorStop::new(0.5, Rgba::new(255, 165, 0, 0.4)),
                    ColorStop::new(1.0, Rgba::TRANSPARENT),
                ],
            },
        }
    }

    fn legend(&self, total: usize) -> Vec<DrawCommand> {
        let (x, y) = self.config.legend_origin;
        let (w, h) = self.config.legend_size;

        vec![
            DrawCommand::FillRect {
                origin: Vec2::new(x, y),
                size: Vec2::new(w, h),
                paint: Paint::LinearGradient {
                    start: Vec2::new(0.0, y),
                    end: Vec2::new(0.0, y + h),
                    stops: vec![
                        ColorStop::new(0.0, Rgba::RED),
                        ColorStop::new(0.5, Rgba::ORANGE),
                        ColorStop::new(1.0, Rgba::GREEN),
                    ],
                },
            },
            DrawCommand::text("High", Vec2::new(x + 30.0, y + 10.0), LEGEND_LABEL_PX, Rgba::WHITE),
            DrawCommand::text("Medium", Vec2::new(x + 30.0, y + 55.0), LEGEND_LABEL_PX, Rgba::WHITE),
            DrawCommand::text("Low", Vec2::new(x + 30.0, y + h + 5.0), LEGEND_LABEL_PX, Rgba::WHITE),
            DrawCommand::text(
                format!("Total Impacts: {}", total),
                Vec2::new(x, y + h + 40.0),
                TOTAL_LABEL_PX,
                Rgba::WHITE,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn impact(x: f32, y: f32) -> Impact {
        Impact {
            position: Vec2::new(x, y),
        }
    }

    fn labels(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(label) => Some(label.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_dimensions_round_up() {
        let grid = RiskGrid::from_impacts(&[], 820.0, 600.0);
        assert_eq!(grid.cols(), 17);
        assert_eq!(grid.rows(), 12);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn test_bucketing_floors_coordinates() {
        let impacts = [impact(49.9, 0.0), impact(50.0, 0.0), impact(99.0, 49.0), impact(0.0, 0.0)];
        let grid = RiskGrid::from_impacts(&impacts, 800.0, 600.0);
        assert_eq!(grid.count(0, 0), 2);
        assert_eq!(grid.count(1, 0), 2);
        assert_eq!(grid.count(2, 0), 0);
    }

    #[test]
    fn test_out_of_range_impacts_are_ignored() {
        let impacts = [impact(-1.0, 10.0), impact(10.0, -0.5), impact(800.0, 10.0), impact(10.0, 600.0)];
        let grid = RiskGrid::from_impacts(&impacts, 800.0, 600.0);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn test_opacity_is_capped() {
        let impacts: Vec<_> = (0..7).map(|_| impact(10.0, 10.0)).chain([impact(60.0, 10.0)]).collect();
        let grid = RiskGrid::from_impacts(&impacts, 800.0, 600.0);
        assert_relative_eq!(grid.opacity(0, 0), 0.5);
        assert_relative_eq!(grid.opacity(1, 0), 0.2);
        assert_relative_eq!(grid.opacity(5, 5), 0.0);
    }

    #[test]
    fn test_cells_are_column_major() {
        let impacts = [impact(60.0, 10.0), impact(10.0, 60.0), impact(10.0, 10.0)];
        let grid = RiskGrid::from_impacts(&impacts, 200.0, 200.0);
        let order: Vec<_> = grid.cells().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_total_label_matches_history() {
        let renderer = HeatmapRenderer::default();
        let impacts: Vec<_> = (0..12).map(|i| impact(i as f32 * 30.0, 500.0)).collect();
        let commands = renderer.render(&impacts, 800.0, 600.0);
        assert_eq!(labels(&commands), vec!["High", "Medium", "Low", "Total Impacts: 12"]);
    }

    #[test]
    fn test_empty_history_draws_only_legend() {
        let commands = HeatmapRenderer::default().render(&[], 800.0, 600.0);
        assert_eq!(commands.len(), 5);
        assert!(labels(&commands).contains(&"Total Impacts: 0"));
    }

    #[test]
    fn test_draw_order_glows_then_legend_then_cells() {
        let renderer = HeatmapRenderer::default();
        let commands = renderer.render(&[impact(100.0, 500.0), impact(300.0, 500.0)], 800.0, 600.0);

        assert_eq!(commands.len(), 2 + 5 + 2);
        assert!(matches!(commands[0], DrawCommand::FillCircle { radius, .. } if radius == 50.0));
        assert!(matches!(commands[2], DrawCommand::FillRect { paint: Paint::LinearGradient { .. }, .. }));
        assert!(matches!(
            &commands[7],
            DrawCommand::FillRect { origin, paint: Paint::Solid(color), .. }
                if *origin == Vec2::new(100.0, 500.0) && (color.a - 0.2).abs() < 1e-6
        ));
    }

    #[test]
    fn test_render_does_not_touch_history() {
        let impacts = vec![impact(1.0, 2.0)];
        let copy = impacts.clone();
        HeatmapRenderer::default().render(&impacts, 800.0, 600.0);
        assert_eq!(impacts, copy);
    }
}

//! Display targets for finished figures.

use super::figure::Figure;
use crate::error::Result;

/// Something that can show a figure
pub trait FigureSink {
    fn show(&mut self, figure: &Figure) -> Result<()>;
}

impl<S: FigureSink + ?Sized> FigureSink for &mut S {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        (**self).show(figure)
    }
}

/// Discards every figure
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FigureSink for NullSink {
    fn show(&mut self, _figure: &Figure) -> Result<()> {
        Ok(())
    }
}

/// Keeps a copy of every figure shown
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    shown: Vec<Figure>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> &[Figure] {
        &self.shown
    }

    pub fn show_count(&self) -> usize {
        self.shown.len()
    }
}

impl FigureSink for RecordingSink {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.shown.push(figure.clone());
        Ok(())
    }
}

#[cfg(feature = "gui")]
pub use window::WindowSink;

#[cfg(feature = "gui")]
mod window {
    use super::FigureSink;
    use crate::chart::figure::Figure;
    use crate::chart::widget::FigureWidget;
    use crate::error::{ChartError, Result};

    /// Opens a native window and blocks until it is closed
    #[derive(Debug, Clone)]
    pub struct WindowSink {
        width: f32,
        height: f32,
    }

    impl Default for WindowSink {
        fn default() -> Self {
            Self {
                width: 1200.0,
                height: 800.0,
            }
        }
    }

    impl WindowSink {
        pub fn new(width: f32, height: f32) -> Self {
            Self { width, height }
        }
    }

    struct FigureApp {
        widget: FigureWidget,
    }

    impl eframe::App for FigureApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE.fill(crate::chart::base::BLACK_COLOR))
                .show(ctx, |ui| {
                    self.widget.ui(ui);
                });
        }
    }

    impl FigureSink for WindowSink {
        fn show(&mut self, figure: &Figure) -> Result<()> {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([self.width, self.height])
                    .with_title(figure.title()),
                ..Default::default()
            };

            let widget = FigureWidget::new(figure.clone());
            tracing::info!("showing figure: {}", figure.title());

            eframe::run_native(
                figure.title(),
                options,
                Box::new(move |cc| {
                    cc.egui_ctx.set_visuals(egui::Visuals::dark());
                    Ok(Box::new(FigureApp { widget }))
                }),
            )
            .map_err(|e| ChartError::Display(e.to_string()))
        }
    }
}

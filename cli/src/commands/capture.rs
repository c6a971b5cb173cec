//! `scanwise scan` and `scanwise ocr` command handlers

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;

use scanwise_core::CoreError;
use scanwise_core::domain::capture::entities::{
    BarcodeScanOutcome, ExtractedProduct, ImagePayload,
};
use scanwise_core::domain::capture::ports::FrameSource;

use crate::cli::{OcrArgs, ScanArgs};
use crate::commands::{AppContext, analyze, load_image};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// A "camera" that serves a single image file. Capture flows are written
/// against the frame-source port, so feeding them a file is just another
/// adapter.
struct FileFrameSource {
    frame: ImagePayload,
}

impl FrameSource for FileFrameSource {
    async fn acquire(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn capture(&self) -> Result<ImagePayload, CoreError> {
        Ok(self.frame.clone())
    }

    fn release(&self) {}
}

pub async fn scan(
    args: ScanArgs,
    ctx: &mut AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = Arc::new(FileFrameSource {
        frame: load_image(&args.image)?,
    });
    let mut capture = ctx.service.barcode_capture(source);

    // A fresh debouncer never suppresses the first scan, but a suppressed
    // outcome reads the same as "nothing found".
    let outcome = capture.capture_and_scan().await?.unwrap_or_default();

    if args.analyze && outcome.found {
        let mut workflow = ctx.service.workflow();
        if workflow.apply_barcode_outcome(&outcome) {
            return analyze::submit_and_render(&mut workflow, ctx, writer).await;
        }
    }

    writer.render(&ScanOutput { outcome })
}

pub async fn ocr(
    args: OcrArgs,
    ctx: &mut AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut uploader = ctx.service.uploader();
    uploader.attach_front(load_image(&args.front)?)?;
    if let Some(back) = &args.back {
        uploader.attach_back(load_image(back)?)?;
    }

    let extracted = uploader.upload().await?;

    if args.analyze {
        let mut workflow = ctx.service.workflow();
        workflow.apply_extracted(&extracted);
        return analyze::submit_and_render(&mut workflow, ctx, writer).await;
    }

    writer.render(&OcrOutput { extracted })
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    outcome: BarcodeScanOutcome,
}

impl Render for ScanOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if !self.outcome.found {
            writeln!(w, "No barcode recognized in the image.")?;
            return Ok(());
        }
        if let Some(code) = &self.outcome.barcode {
            writeln!(w, "Barcode: {code}")?;
        }
        match &self.outcome.product {
            Some(product) => {
                writeln!(w, "Product: {}", product.product_name)?;
                if !product.ingredients_text.is_empty() {
                    writeln!(w, "Ingredients: {}", product.ingredients_text)?;
                }
            }
            None => writeln!(w, "Barcode recognized but no product record matched.")?,
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct OcrOutput {
    extracted: ExtractedProduct,
}

impl Render for OcrOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let e = &self.extracted;
        writeln!(w, "Product: {}", e.product_name)?;
        if !e.brand.is_empty() {
            writeln!(w, "Brand: {}", e.brand)?;
        }
        if !e.category.is_empty() {
            writeln!(w, "Category: {}", e.category)?;
        }
        if !e.ingredients.is_empty() {
            writeln!(w, "Ingredients: {}", e.ingredients.join(", "))?;
        }
        Ok(())
    }
}

use std::sync::Arc;

use crate::api::Translator;

use super::error::ScrapeError;
use super::types::{ReportData, TranslationSlot};
use super::wave::Wave;

/// Most source strings sent in one translation request.
pub const TRANSLATE_BATCH_SIZE: usize = 5;

#[derive(Clone, Debug)]
pub struct TranslateOptions {
    pub batch_size: usize,
    pub source_lang: String,
    pub target_lang: String,
    pub limit: Option<usize>,
}

/// Consecutive runs of at most `size` slots, in incoming order.
pub fn partition(slots: Vec<TranslationSlot>, size: usize) -> Vec<Vec<TranslationSlot>> {
    let size = size.max(1);
    let mut out: Vec<Vec<TranslationSlot>> = Vec::with_capacity(slots.len().div_ceil(size));
    for slot in slots {
        match out.last_mut() {
            Some(batch) if batch.len() < size => batch.push(slot),
            _ => out.push(vec![slot]),
        }
    }
    out
}

/// Translate all slots, one request per batch, and write each result back to
/// its slot's destination. Returns the number of titles written.
pub async fn translate_slots(
    translator: Arc<dyn Translator>,
    slots: Vec<TranslationSlot>,
    opts: &TranslateOptions,
    data: &mut ReportData,
) -> Result<usize, ScrapeError> {
    let batches = partition(slots, opts.batch_size);

    let size = opts.batch_size.max(1);
    let mut wave = Wave::new(opts.limit);
    for (bi, batch) in batches.iter().enumerate() {
        let texts: Vec<String> = batch.iter().map(|s| s.source.clone()).collect();
        let translator = translator.clone();
        let (source, target) = (opts.source_lang.clone(), opts.target_lang.clone());
        wave.spawn(async move {
            let out = translator.translate(&texts, &source, &target).await?;
            if out.len() != texts.len() {
                return Err(ScrapeError::TranslationCountMismatch { expected: texts.len(), got: out.len() });
            }
            if let Some(i) = texts.iter().zip(&out).position(|(s, t)| !s.is_empty() && t.is_empty()) {
                return Err(ScrapeError::EmptyTranslation { index: bi * size + i, source_text: texts[i].clone() });
            }
            Ok((bi, out))
        });
    }
    let translated = wave.join().await?;

    let mut written = 0usize;
    for (bi, outputs) in translated {
        for (slot, text) in batches[bi].iter().zip(outputs) {
            let video = data
                .video_mut(slot.dest)
                .ok_or_else(|| ScrapeError::DanglingHandle(format!("{:?}", slot.dest)))?;
            video.title_translated = text;
            written += 1;
        }
    }
    Ok(written)
}

/// Every titled video must carry a translation before rendering.
pub fn ensure_translated(data: &ReportData) -> Result<(), ScrapeError> {
    match data.untranslated().len() {
        0 => Ok(()),
        count => Err(ScrapeError::Untranslated { count }),
    }
}

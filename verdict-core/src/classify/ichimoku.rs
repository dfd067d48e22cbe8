//! Ichimoku classifier: close against the cloud, confirmed by Tenkan/Kijun.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{Ichimoku, IchimokuLine, IchimokuParams, IndicatorValues};

#[derive(Debug, Clone)]
pub struct IchimokuClassifier {
    pub params: IchimokuParams,
    tenkan_key: String,
    kijun_key: String,
    span_a_key: String,
    span_b_key: String,
}

impl IchimokuClassifier {
    pub fn new(params: IchimokuParams) -> Self {
        Self {
            params,
            tenkan_key: Ichimoku::key(&params, IchimokuLine::Tenkan),
            kijun_key: Ichimoku::key(&params, IchimokuLine::Kijun),
            span_a_key: Ichimoku::key(&params, IchimokuLine::SenkouA),
            span_b_key: Ichimoku::key(&params, IchimokuLine::SenkouB),
        }
    }
}

impl Classifier for IchimokuClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Ichimoku
    }

    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let (Some(tenkan), Some(kijun), Some(span_a), Some(span_b)) = (
            indicators.defined(&self.tenkan_key, bar_index),
            indicators.defined(&self.kijun_key, bar_index),
            indicators.defined(&self.span_a_key, bar_index),
            indicators.defined(&self.span_b_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        let close = bars[bar_index].close;

        let cloud_top = span_a.max(span_b);
        let cloud_bottom = span_a.min(span_b);

        let (verdict, reading) = if close > cloud_top && tenkan > kijun {
            (Verdict::StrongBuy, "above cloud, tenkan over kijun")
        } else if close < cloud_bottom && tenkan < kijun {
            (Verdict::StrongSell, "below cloud, tenkan under kijun")
        } else if close > cloud_top {
            (Verdict::Buy, "above cloud")
        } else if close < cloud_bottom {
            (Verdict::Sell, "below cloud")
        } else {
            (Verdict::Hold, "inside cloud")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            close - (span_a + span_b) / 2.0,
            format!(
                "close {close:.2} cloud [{cloud_bottom:.2}, {cloud_top:.2}] tenkan {tenkan:.2} kijun {kijun:.2} - {reading}"
            ),
        )
    }
}

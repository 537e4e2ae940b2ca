//! 파이프라인 오케스트레이터.
//!
//! Normalizer → Z-Score Engine → Strength Scorer → Volume Spike Detector →
//! Pattern Classifier 순서로 실행하여 원시 테이블을 분석 테이블로 변환합니다.
//!
//! 파이프라인은 순수 함수입니다. 실행 사이에 상태를 보관하지 않으며,
//! 결과 캐싱은 [`crate::cache::ScoreCache`]가 명시적으로 담당합니다.
//!
//! # 점수 범위
//!
//! - [`Pipeline::run`]: 전달된 레코드 전체에 대해 z-score와 강도 점수를 계산
//! - [`Pipeline::run_filtered`]: 스파이크는 전체 이력으로, 점수는 필터된 행만으로 계산
//!
//! `degraded` 행은 z-score와 min-max 집합에서 빠집니다. 해당 행은 z-score 0,
//! 강도 점수 0, 패턴 Normal이며 진단 항목이 남습니다.

use bandar_core::{
    pipeline_span, AnalyzedRecord, AnalyzedTable, AppConfig, BigPlayerPattern, DerivedFields,
    Diagnostic, PatternConfig, ScoringConfig, SpikeConfig, TradingRecord,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::normalizer::Normalizer;
use crate::pattern::{PatternClassifier, PatternInput};
use crate::strength::StrengthScorer;
use crate::volume_spike::{SpikeMeasure, VolumeSpikeDetector};
use crate::zscore::{FeatureZScores, ZScoreEngine};

/// 행 선택 필터 (대시보드의 날짜/섹터 필터).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowFilter {
    /// 거래일 (None이면 전체)
    pub date: Option<NaiveDate>,
    /// 섹터 목록 (비어 있으면 전체)
    pub sectors: Vec<String>,
}

impl RowFilter {
    /// 전체 행을 선택하는 필터.
    pub fn all() -> Self {
        Self::default()
    }

    /// 특정 거래일만 선택하는 필터.
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            sectors: Vec::new(),
        }
    }

    /// 섹터 조건을 추가합니다.
    pub fn with_sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sectors = sectors.into_iter().map(Into::into).collect();
        self.sectors.sort();
        self.sectors.dedup();
        self
    }

    /// 레코드가 필터 조건을 만족하는지 확인합니다.
    pub fn matches(&self, record: &TradingRecord) -> bool {
        let date_ok = self.date.map_or(true, |d| record.date == d);
        let sector_ok = self.sectors.is_empty() || self.sectors.iter().any(|s| *s == record.sector);
        date_ok && sector_ok
    }

    /// 로그/캐시 키 표시용 문자열.
    pub fn describe(&self) -> String {
        let date = self
            .date
            .map_or_else(|| "all-dates".to_string(), |d| d.to_string());
        if self.sectors.is_empty() {
            format!("{date}|all-sectors")
        } else {
            format!("{date}|{}", self.sectors.join(","))
        }
    }
}

/// 분석 파이프라인.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    normalizer: Normalizer,
    zscore: ZScoreEngine,
    scorer: StrengthScorer,
    spike: VolumeSpikeDetector,
    classifier: PatternClassifier,
}

impl Pipeline {
    /// 개별 설정으로 파이프라인을 생성합니다.
    pub fn new(scoring: ScoringConfig, spike: SpikeConfig, pattern: PatternConfig) -> Self {
        Self {
            normalizer: Normalizer::new(scoring.epsilon),
            zscore: ZScoreEngine::new(),
            scorer: StrengthScorer::new(scoring),
            spike: VolumeSpikeDetector::new(spike),
            classifier: PatternClassifier::new(pattern),
        }
    }

    /// 애플리케이션 설정에서 파이프라인을 생성합니다 (설정 검증 포함).
    pub fn from_config(config: &AppConfig) -> PipelineResult<Self> {
        config
            .validate()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(config.scoring, config.spike, config.pattern))
    }

    /// 전달된 레코드 전체를 분석합니다.
    ///
    /// 빈 입력은 빈 테이블을 반환합니다.
    pub fn run(&self, records: &[TradingRecord]) -> AnalyzedTable {
        let span = pipeline_span!("pipeline_run", records.len(), "all");
        let _enter = span.enter();

        let spikes = self.spike.detect(records);
        let selection: Vec<usize> = (0..records.len()).collect();
        self.analyze(records, &spikes, &selection)
    }

    /// 스파이크는 전체 이력으로 계산하고, 필터된 행만 점수화하여 반환합니다.
    pub fn run_filtered(&self, records: &[TradingRecord], filter: &RowFilter) -> AnalyzedTable {
        let span = pipeline_span!("pipeline_run", records.len(), filter.describe());
        let _enter = span.enter();

        let spikes = self.spike.detect(records);
        let selection: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect();
        debug!(selected = selection.len(), "필터 적용");

        self.analyze(records, &spikes, &selection)
    }

    /// 선택된 행에 대해 정규화, z-score, 점수, 패턴을 계산합니다.
    fn analyze(
        &self,
        records: &[TradingRecord],
        spikes: &[SpikeMeasure],
        selection: &[usize],
    ) -> AnalyzedTable {
        if selection.is_empty() {
            info!("분석할 행이 없습니다");
            return AnalyzedTable::empty();
        }

        let selected: Vec<&TradingRecord> = selection.iter().map(|&i| &records[i]).collect();

        let features: Vec<_> = selected.iter().map(|r| self.normalizer.normalize(r)).collect();

        // 점수 집합: 수치가 온전한 행만
        let scored: Vec<usize> = (0..selected.len())
            .filter(|&pos| !selected[pos].degraded)
            .collect();
        let scored_features: Vec<_> = scored.iter().map(|&pos| features[pos]).collect();
        let scored_signals: Vec<_> = scored
            .iter()
            .map(|&pos| &selected[pos].final_signal)
            .collect();
        let scored_z = self.zscore.compute(&scored_features);
        let scored_scores = self.scorer.score_all(&scored_z, &scored_signals);

        let mut zscores = vec![FeatureZScores::default(); selected.len()];
        let mut scores = vec![0.0; selected.len()];
        for (k, &pos) in scored.iter().enumerate() {
            zscores[pos] = scored_z[k];
            scores[pos] = scored_scores[k];
        }
        debug!(
            rows = selected.len(),
            scored = scored.len(),
            "강도 점수 계산 완료"
        );

        let mut diagnostics = Vec::new();
        let mut rows = Vec::with_capacity(selected.len());

        for (pos, &idx) in selection.iter().enumerate() {
            let record = &records[idx];
            let spike = spikes[idx];
            let flow = record.foreign_flow();

            let pattern = if record.degraded {
                warn!(
                    stock_code = %record.stock_code,
                    date = %record.date,
                    "수치 필드가 대체된 행은 Normal로 분류합니다"
                );
                diagnostics.push(Diagnostic::row_warning(
                    record,
                    "degraded row: excluded from scoring, pattern set to Normal",
                ));
                BigPlayerPattern::Normal
            } else {
                self.classifier.classify(&PatternInput {
                    volume_spike: spike.spike,
                    flow,
                    imbalance: record.imbalance,
                })
            };

            let f = features[pos];
            let z = zscores[pos];
            rows.push(AnalyzedRecord {
                record: record.clone(),
                derived: DerivedFields {
                    foreign_flow_direction: flow,
                    volume_norm: f.volume_norm,
                    imbalance_norm: f.imbalance_norm,
                    foreign_ratio: f.foreign_ratio,
                    z_volume: z.z_volume,
                    z_imbalance: z.z_imbalance,
                    z_foreign: z.z_foreign,
                    rolling_avg_volume_30: spike.rolling_avg.unwrap_or(0.0),
                    volume_spike_ratio: spike.ratio.unwrap_or(0.0),
                    volume_spike: spike.spike,
                    strength_score: scores[pos],
                    big_player_pattern: pattern,
                },
            });
        }

        let table = AnalyzedTable { rows, diagnostics };
        info!(
            rows = table.len(),
            spikes = table.spike_count(),
            flagged = table.flagged_count(),
            diagnostics = table.diagnostics.len(),
            "파이프라인 실행 완료"
        );
        table
    }
}

//! Display derivations for the rendering layer

use crate::model::{MetricsSnapshot, PredictionSummary, TimelinePoint};

/// Width of the sparkline view box
const SPARKLINE_WIDTH: f64 = 100.0;

/// Height of the sparkline view box
const SPARKLINE_HEIGHT: f64 = 40.0;

/// Floor for the sparkline maximum so an all-zero timeline still renders
const SPARKLINE_MIN_MAX: f64 = 0.01;

/// Round a [0, 1] ratio to a whole percentage
pub fn percent(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Polyline points for the confidence sparkline. X spreads the samples over
/// the view box width, Y scales against the largest confidence in the
/// window so the line always uses the full height.
pub fn sparkline_points(timeline: &[TimelinePoint]) -> Vec<(f32, f32)> {
    let max = timeline
        .iter()
        .map(|point| point.confidence)
        .fold(SPARKLINE_MIN_MAX, f64::max);
    let span = timeline.len().saturating_sub(1).max(1) as f64;

    timeline
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let x = idx as f64 / span * SPARKLINE_WIDTH;
            let y = SPARKLINE_HEIGHT - point.confidence / max * SPARKLINE_HEIGHT;
            (x as f32, y as f32)
        })
        .collect()
}

/// The newest `limit` predictions, newest first
pub fn recent_predictions(snapshot: &MetricsSnapshot, limit: usize) -> Vec<&PredictionSummary> {
    snapshot.recent_predictions.iter().rev().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelCounts, SentimentLabel};
    use chrono::{Duration, Utc};

    fn point(confidence: f64) -> TimelinePoint {
        TimelinePoint {
            timestamp: Utc::now(),
            confidence,
        }
    }

    #[test]
    fn test_percent_rounds_to_whole_numbers() {
        assert_eq!(percent(0.81), 81);
        assert_eq!(percent(0.95), 95);
        assert_eq!(percent(0.954), 95);
        assert_eq!(percent(0.955), 96);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_sparkline_empty_timeline() {
        assert!(sparkline_points(&[]).is_empty());
    }

    #[test]
    fn test_sparkline_single_point_sits_at_origin_x() {
        let points = sparkline_points(&[point(0.5)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].0, 0.0);
        // Single sample is its own maximum, so it touches the top
        assert_eq!(points[0].1, 0.0);
    }

    #[test]
    fn test_sparkline_spreads_x_and_scales_y() {
        let points = sparkline_points(&[point(0.4), point(0.8), point(0.8)]);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[1].0, 50.0);
        assert_eq!(points[2].0, 100.0);

        // 0.8 is the max, so those samples touch the top; 0.4 sits halfway
        assert_eq!(points[1].1, 0.0);
        assert_eq!(points[2].1, 0.0);
        assert!((points[0].1 - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_sparkline_floors_the_maximum() {
        let points = sparkline_points(&[point(0.0), point(0.0)]);
        assert!(points.iter().all(|(_, y)| *y == 40.0));
    }

    #[test]
    fn test_recent_predictions_newest_first() {
        let base = Utc::now();
        let predictions: Vec<PredictionSummary> = (0..8)
            .map(|idx| PredictionSummary {
                label: SentimentLabel::Positive,
                confidence: idx as f64 / 10.0,
                timestamp: base + Duration::seconds(idx),
            })
            .collect();

        let snapshot = MetricsSnapshot {
            total_requests: 8,
            label_counts: LabelCounts {
                positive: 8,
                negative: 0,
                neutral: 0,
            },
            average_confidence: 0.35,
            recent_predictions: predictions,
            timeline: vec![],
        };

        let recent = recent_predictions(&snapshot, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].confidence, 0.7);
        assert_eq!(recent[4].confidence, 0.3);
    }
}

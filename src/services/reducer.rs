use cmyk_search::{
    Cmyk, ColorSpaceConverter, ConversionError, SearchResult, SearchStep, ThreeChannelSearcher,
};

use crate::error::ReduceError;
use crate::models::{Artwork, Color, ColorSlot, Document, Painted};

/// One color that was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChange {
    /// Index path into the selection, e.g. `selection[2].children[0]`
    pub location: String,
    pub slot: ColorSlot,
    pub before: Cmyk,
    /// Rounded three-channel replacement
    pub after: Cmyk,
    /// ΔE76 between `before` and the unrounded replacement
    pub difference: f64,
}

/// What a batch did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub step: SearchStep,
    /// Replaced colors in processing order
    pub changes: Vec<ColorChange>,
    /// Objects of unsupported types
    pub skipped: usize,
}

impl BatchReport {
    fn new(step: SearchStep) -> Self {
        Self {
            step,
            changes: Vec::new(),
            skipped: 0,
        }
    }

    /// Number of colors replaced.
    pub fn converted(&self) -> usize {
        self.changes.len()
    }
}

/// Where and why traversal stopped.
struct Failure {
    location: String,
    slot: ColorSlot,
    source: ConversionError,
}

/// Replaces the CMYK fills and strokes of a selection with their closest
/// three-channel match.
pub struct ColorReducer<C> {
    converter: C,
    step: SearchStep,
}

impl<C: ColorSpaceConverter> ColorReducer<C> {
    pub fn new(converter: C, step: SearchStep) -> Self {
        Self { converter, step }
    }

    pub fn step(&self) -> SearchStep {
        self.step
    }

    /// Closest three-channel match for a single color.
    pub fn reduce_color(&self, cmyk: Cmyk) -> Result<SearchResult, ConversionError> {
        let target = self.converter.cmyk_to_lab(cmyk)?;
        ThreeChannelSearcher::new(&self.converter).find_best_three_color(target, self.step)
    }

    /// Convert every CMYK fill and stroke in the selection, in selection
    /// order.
    ///
    /// Nothing is touched when there is no document or the selection is
    /// empty. A conversion failure stops the batch: objects before it keep
    /// their new colors and are listed in the error's `completed` report.
    pub fn reduce_selection(
        &self,
        document: Option<&mut Document>,
    ) -> Result<BatchReport, ReduceError> {
        let document = document.ok_or(ReduceError::NoDocument)?;
        if document.selection.is_empty() {
            return Err(ReduceError::EmptySelection);
        }

        if !self.step.reaches_full_coverage() {
            tracing::warn!(
                step = %self.step,
                "Step does not divide 100, full coverage will not be tried"
            );
        }

        let mut report = BatchReport::new(self.step);
        match self.reduce_items(&mut document.selection, "selection", &mut report) {
            Ok(()) => {
                tracing::info!(
                    step = %self.step,
                    converted = report.converted(),
                    skipped = report.skipped,
                    "Selection reduced"
                );
                Ok(report)
            }
            Err(failure) => {
                tracing::warn!(
                    location = %failure.location,
                    slot = %failure.slot,
                    error = %failure.source,
                    converted = report.converted(),
                    "Conversion failed, stopping"
                );
                Err(ReduceError::Conversion {
                    location: failure.location,
                    slot: failure.slot,
                    completed: report,
                    source: failure.source,
                })
            }
        }
    }

    fn reduce_items(
        &self,
        items: &mut [Artwork],
        parent: &str,
        report: &mut BatchReport,
    ) -> Result<(), Failure> {
        for (index, item) in items.iter_mut().enumerate() {
            let location = format!("{parent}[{index}]");
            match item {
                Artwork::Path(path) => self.reduce_painted(path, &location, report)?,
                Artwork::TextFrame(frame) => self.reduce_painted(frame, &location, report)?,
                Artwork::CompoundPath(compound) => {
                    for (i, path) in compound.paths.iter_mut().enumerate() {
                        self.reduce_painted(path, &format!("{location}.paths[{i}]"), report)?;
                    }
                }
                Artwork::Group(group) => {
                    self.reduce_items(
                        &mut group.children,
                        &format!("{location}.children"),
                        report,
                    )?;
                }
                Artwork::Other { kind } => {
                    tracing::trace!(%location, %kind, "Skipping unsupported object");
                    report.skipped += 1;
                }
            }
        }
        Ok(())
    }

    /// Fill first, then stroke. Non-CMYK and missing colors are left alone.
    fn reduce_painted<P: Painted>(
        &self,
        item: &mut P,
        location: &str,
        report: &mut BatchReport,
    ) -> Result<(), Failure> {
        for slot in ColorSlot::ALL {
            let Some(before) = item.color_mut(slot).as_ref().and_then(Color::as_cmyk) else {
                continue;
            };

            let best = self.reduce_color(before).map_err(|source| Failure {
                location: location.to_string(),
                slot,
                source,
            })?;

            *item.color_mut(slot) = Some(Color::from(best.cmyk));
            tracing::debug!(
                %location,
                %slot,
                %before,
                after = %best.cmyk,
                difference = best.difference,
                "Color reduced"
            );
            report.changes.push(ColorChange {
                location: location.to_string(),
                slot,
                before,
                after: best.cmyk,
                difference: best.difference,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompoundPath, Group, PathItem, TextFrame};
    use cmyk_search::{Channel, Lab, SubtractiveInkModel};
    use pretty_assertions::assert_eq;

    fn step(v: f64) -> SearchStep {
        SearchStep::new(v).unwrap()
    }

    fn linear(c: Cmyk) -> Result<Lab, ConversionError> {
        Ok(Lab::new(
            100.0 - c.k - 0.3 * (c.c + c.m + c.y),
            c.m - c.c,
            c.y - 0.5 * (c.c + c.m),
        ))
    }

    fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Option<Color> {
        Some(Color::from(Cmyk::new(c, m, y, k)))
    }

    fn filled(fill: Option<Color>) -> PathItem {
        PathItem {
            name: None,
            fill,
            stroke: None,
        }
    }

    fn document(selection: Vec<Artwork>) -> Document {
        Document {
            name: Some("test".to_string()),
            selection,
        }
    }

    #[test]
    fn test_no_document() {
        let reducer = ColorReducer::new(linear, step(10.0));
        assert!(matches!(
            reducer.reduce_selection(None),
            Err(ReduceError::NoDocument)
        ));
    }

    #[test]
    fn test_empty_selection_leaves_document_untouched() {
        let reducer = ColorReducer::new(linear, step(10.0));
        let mut doc = document(Vec::new());
        let before = doc.clone();
        assert!(matches!(
            reducer.reduce_selection(Some(&mut doc)),
            Err(ReduceError::EmptySelection)
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_reduce_color_uses_three_channels() {
        let reducer = ColorReducer::new(linear, step(10.0));
        // Same Lab as C40 M0 Y20 K10 under the linear model
        let best = reducer.reduce_color(Cmyk::new(50.0, 10.0, 30.0, 1.0)).unwrap();
        assert_eq!(best.cmyk, Cmyk::new(40.0, 0.0, 20.0, 10.0));
        assert!(best.difference < 1e-9);
    }

    #[test]
    fn test_fill_and_stroke_converted() {
        let reducer = ColorReducer::new(linear, step(10.0));
        let mut doc = document(vec![Artwork::Path(PathItem {
            name: None,
            fill: cmyk(50.0, 10.0, 30.0, 1.0),
            stroke: cmyk(30.0, 60.0, 0.0, 20.0),
        })]);

        let report = reducer.reduce_selection(Some(&mut doc)).unwrap();

        assert_eq!(report.converted(), 2);
        assert_eq!(report.step, step(10.0));
        assert_eq!(report.changes[0].slot, ColorSlot::Fill);
        assert_eq!(report.changes[1].slot, ColorSlot::Stroke);
        assert_eq!(
            doc.selection[0],
            Artwork::Path(PathItem {
                name: None,
                fill: cmyk(40.0, 0.0, 20.0, 10.0),
                stroke: cmyk(30.0, 60.0, 0.0, 20.0),
            })
        );
    }

    #[test]
    fn test_non_cmyk_colors_untouched() {
        let reducer = ColorReducer::new(linear, step(10.0));
        let gray = Some(Color::Gray { gray: 40.0 });
        let spot = Some(Color::Spot {
            name: "Gold".to_string(),
            tint: 80.0,
        });
        let mut doc = document(vec![
            Artwork::Path(PathItem {
                name: None,
                fill: gray.clone(),
                stroke: spot.clone(),
            }),
            Artwork::Path(filled(Some(Color::Rgb {
                red: 255.0,
                green: 0.0,
                blue: 0.0,
            }))),
            Artwork::Path(filled(None)),
        ]);
        let before = doc.clone();

        let report = reducer.reduce_selection(Some(&mut doc)).unwrap();

        assert_eq!(report.converted(), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_traversal_locations() {
        let reducer = ColorReducer::new(linear, step(10.0));
        let mut doc = document(vec![
            Artwork::Other {
                kind: "raster".to_string(),
            },
            Artwork::Group(Group {
                name: None,
                children: vec![
                    Artwork::TextFrame(TextFrame {
                        name: None,
                        contents: "Sale".to_string(),
                        fill: None,
                        stroke: cmyk(30.0, 60.0, 0.0, 20.0),
                    }),
                    Artwork::Group(Group {
                        name: None,
                        children: vec![Artwork::Other {
                            kind: "symbol".to_string(),
                        }],
                    }),
                ],
            }),
            Artwork::CompoundPath(CompoundPath {
                name: None,
                paths: vec![filled(None), filled(cmyk(0.0, 0.0, 0.0, 50.0))],
            }),
        ]);

        let report = reducer.reduce_selection(Some(&mut doc)).unwrap();

        let locations: Vec<(&str, ColorSlot)> = report
            .changes
            .iter()
            .map(|c| (c.location.as_str(), c.slot))
            .collect();
        assert_eq!(
            locations,
            vec![
                ("selection[1].children[0]", ColorSlot::Stroke),
                ("selection[2].paths[1]", ColorSlot::Fill),
            ]
        );
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_failure_keeps_earlier_conversions() {
        // Fails for any color with 77% cyan, which no grid candidate has
        let failing = |c: Cmyk| {
            if c.c == 77.0 {
                Err(ConversionError::ChannelOutOfRange {
                    channel: Channel::Cyan,
                    value: c.c,
                })
            } else {
                linear(c)
            }
        };
        let reducer = ColorReducer::new(failing, step(10.0));
        let mut doc = document(vec![
            Artwork::Path(filled(cmyk(50.0, 10.0, 30.0, 1.0))),
            Artwork::Path(PathItem {
                name: None,
                fill: cmyk(10.0, 10.0, 10.0, 10.0),
                stroke: cmyk(77.0, 0.0, 0.0, 0.0),
            }),
            Artwork::Path(filled(cmyk(20.0, 20.0, 20.0, 20.0))),
        ]);

        let err = reducer.reduce_selection(Some(&mut doc)).unwrap_err();

        match err {
            ReduceError::Conversion {
                location,
                slot,
                completed,
                source,
            } => {
                assert_eq!(location, "selection[1]");
                assert_eq!(slot, ColorSlot::Stroke);
                assert_eq!(completed.converted(), 2);
                assert_eq!(
                    source,
                    ConversionError::ChannelOutOfRange {
                        channel: Channel::Cyan,
                        value: 77.0
                    }
                );
            }
            other => panic!("Expected Conversion error, got {:?}", other),
        }

        // Before the failure: converted
        assert_eq!(
            doc.selection[0],
            Artwork::Path(filled(cmyk(40.0, 0.0, 20.0, 10.0)))
        );
        // The failing slot and everything after it: untouched
        match &doc.selection[1] {
            Artwork::Path(path) => assert_eq!(path.stroke, cmyk(77.0, 0.0, 0.0, 0.0)),
            other => panic!("Expected path, got {:?}", other),
        }
        assert_eq!(
            doc.selection[2],
            Artwork::Path(filled(cmyk(20.0, 20.0, 20.0, 20.0)))
        );
    }

    #[test]
    fn test_ink_model_gray_reduced() {
        let reducer = ColorReducer::new(SubtractiveInkModel::default(), SearchStep::default());
        let mut doc = document(vec![Artwork::TextFrame(TextFrame {
            name: None,
            contents: "Gray".to_string(),
            fill: cmyk(40.0, 40.0, 40.0, 0.0),
            stroke: None,
        })]);

        let report = reducer.reduce_selection(Some(&mut doc)).unwrap();

        let change = &report.changes[0];
        assert!(change.after.zero_chromatic_count() >= 1);
        assert!(change.difference > 0.0 && change.difference < 20.0);
        for value in change.after.channels() {
            assert_eq!(value, value.round());
        }
    }
}

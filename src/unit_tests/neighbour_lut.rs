use super::*;
use crate::error::LutSignal;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Name(&'static str);

#[derive(Clone, Debug)]
struct Cell(Name);

impl CellData for Cell {
    type Name = Name;
    fn cell_name(&self) -> Name {
        self.0.clone()
    }
}

#[test]
fn empty_candidate_map_is_valid() {
    let mut lut: NeighbourSetLut<Cell, &'static str> = NeighbourSetLut::new();
    lut.add_custom_hook(Name("air"), |_| HandlerOutcome::Found(Candidates::new()))
        .unwrap();
    let result = lut.query(&Cell(Name("air"))).unwrap();
    assert!(result.is_empty());
}

#[test]
fn unregistered_cell_name_is_nodata() {
    let lut: NeighbourSetLut<Cell, &'static str> = NeighbourSetLut::new();
    assert_eq!(lut.query(&Cell(Name("stone"))), Err(LutSignal::NoData));
}

#[test]
fn candidates_carry_extradata_keyed_offsets() {
    let mut lut: NeighbourSetLut<Cell, &'static str> = NeighbourSetLut::new();
    lut.add_custom_hook(Name("stone"), |_| {
        let mut map = Candidates::new();
        map.insert("north", Position::new(0, 1, 0));
        map.insert("south", Position::new(0, -1, 0));
        HandlerOutcome::Found(map)
    })
    .unwrap();
    let result = lut.query(&Cell(Name("stone"))).unwrap();
    assert_eq!(result.get("north"), Some(&Position::new(0, 1, 0)));
    assert_eq!(result.len(), 2);
}

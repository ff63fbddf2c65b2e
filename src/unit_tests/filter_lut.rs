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

fn args(src: &'static str, dest: &'static str) -> FilterArgs<Cell, &'static str> {
    FilterArgs {
        src: Cell(Name(src)),
        dest: Cell(Name(dest)),
        extradata: "b",
        direction: Position::new(1, 0, 0),
    }
}

#[test]
fn keyed_by_destination_not_source() {
    let mut lut: InboundFilterLut<Cell, &'static str> = InboundFilterLut::new();
    lut.register(Name("stone"), |a| HandlerOutcome::Found(a.src.0 .0 == "stone"))
        .unwrap();
    assert_eq!(lut.query(&args("stone", "stone")), Ok(true));
    assert_eq!(lut.query(&args("cobble", "stone")), Ok(false));
}

#[test]
fn no_filter_registered_is_nodata_not_acceptance() {
    let lut: InboundFilterLut<Cell, &'static str> = InboundFilterLut::new();
    assert_eq!(lut.query(&args("stone", "air")), Err(LutSignal::NoData));
}

/// Built-in mesh topologies
use clap::ValueEnum;
use springmesh_core::{Result, TopologySpec};

/// Two hexagons joined by a ring of quads
pub const HEX_QUAD: &str = "\
vertices 16
0 1 5 4
4 5 6 7 8 9
10 11 12 13 14 15
8 7 11 10
14 13 2 3
7 6 12 11
9 8 10 15
0 1 2 3
2 3 14 13
";

/// Twelve hexagons in two rings of six
pub const HEX_BAND: &str = "\
vertices 36
0 1 7 13 12 6
1 2 8 15 14 7
2 3 9 17 16 8
3 4 10 19 18 9
4 5 11 21 20 10
5 0 6 23 22 11
12 13 25 31 30 24
14 15 26 32 31 25
16 17 27 33 32 26
18 19 28 34 33 27
20 21 29 35 34 28
22 23 24 30 35 29
";

/// The 1-skeleton of a cube
pub const CUBE: &str = "\
vertices 8
0 1
0 2
0 4
1 5
1 3
2 3
2 6
3 7
4 5
4 6
5 7
6 7
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    HexQuad,
    HexBand,
    Cube,
}

impl Preset {
    pub fn source(self) -> &'static str {
        match self {
            Preset::HexQuad => HEX_QUAD,
            Preset::HexBand => HEX_BAND,
            Preset::Cube => CUBE,
        }
    }

    pub fn topology(self) -> Result<TopologySpec> {
        TopologySpec::parse(self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springmesh_core::Vector3;

    #[test]
    fn test_presets_build() {
        for (preset, vertices, edges) in [
            (Preset::HexQuad, 16, 40),
            (Preset::HexBand, 36, 72),
            (Preset::Cube, 8, 12),
        ] {
            let spec = preset.topology().unwrap();
            assert_eq!(spec.vertex_count, vertices);
            let mesh = spec.build(vec![Vector3::ZERO; vertices]).unwrap();
            assert_eq!(mesh.edge_count(), edges);
        }
    }
}

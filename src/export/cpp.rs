// src/export/cpp.rs

use std::fmt::{self, Write};

use super::{validate_areas, CodeGenerator};
use crate::error::ExportError;
use crate::map::{Room, RoomLinkMap, TileArea};
use crate::{APPLICATION_NAME, BUILD_VERSION};

/// Emits a C++ brace-initialiser for a `TilemapInformation` struct.
///
/// The room-grid dimensions and the tilemap reference are left as bare
/// assignments, to be completed by hand or by a later pass.
#[derive(Debug, Clone, Default)]
pub struct CppCodeGenerator;

impl CppCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for CppCodeGenerator {
    fn generate_rooms(&self, out: &mut dyn fmt::Write, areas: &[TileArea]) -> Result<(), ExportError> {
        validate_areas(areas)?;

        writeln!(out, "// Autogenerated C++ using {} {}", APPLICATION_NAME, BUILD_VERSION)?;
        writeln!(out, "// ALL CHANGES WILL BE UNDONE! DO NOT EDIT!")?;

        writeln!(out, "TilemapInformation ti;")?;
        writeln!(out, "ti.rooms = ")?;
        writeln!(out, "{{")?;

        for area in areas {
            writeln!(out, "\t{{")?;
            writeln!(out, "\t\t{{")?;
            for row in area.rows() {
                out.write_str("\t\t\t{")?;
                write_joined(out, row.iter())?;
                out.write_str("},\n")?;
            }
            writeln!(out, "\t\t}}")?;
            writeln!(out, "\t}},")?;
        }

        writeln!(out, "}};")?;
        writeln!(out, "ti.roomsAcross = ")?;
        writeln!(out, "ti.roomsDown = ")?;
        writeln!(out, "ti.tilemap = ")?;
        Ok(())
    }

    fn generate_room_links(&self, out: &mut dyn fmt::Write, links: &RoomLinkMap) -> Result<(), ExportError> {
        let mut entries: Vec<_> = links.iter().collect();
        entries.sort_by_key(|(room, _)| (room.y, room.x));

        writeln!(out, "ti.links = ")?;
        writeln!(out, "{{")?;
        for (room, linked) in entries {
            writeln!(
                out,
                "\t{{{{{},{}}},{},{}}},",
                room.x,
                room.y,
                position(linked.up),
                position(linked.left)
            )?;
        }
        writeln!(out, "}};")?;
        Ok(())
    }
}

fn position(room: Option<Room>) -> String {
    match room {
        Some(room) => format!("{{{},{}}}", room.x, room.y),
        None => "{-1,-1}".to_string(),
    }
}

fn write_joined<'a>(out: &mut dyn fmt::Write, values: impl Iterator<Item = &'a usize>) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, "{}", value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::link_rooms;

    #[test]
    fn test_full_output() {
        let areas = [TileArea::new(2, 2, vec![1, 2, 3, 4]), TileArea::new(3, 1, vec![0, 5, 0])];
        let text = CppCodeGenerator::new().generate(&areas).unwrap();

        let expected = format!(
            "// Autogenerated C++ using {} {}\n\
             // ALL CHANGES WILL BE UNDONE! DO NOT EDIT!\n\
             TilemapInformation ti;\n\
             ti.rooms = \n\
             {{\n\
             \t{{\n\
             \t\t{{\n\
             \t\t\t{{1,2}},\n\
             \t\t\t{{3,4}},\n\
             \t\t}}\n\
             \t}},\n\
             \t{{\n\
             \t\t{{\n\
             \t\t\t{{0,5,0}},\n\
             \t\t}}\n\
             \t}},\n\
             }};\n\
             ti.roomsAcross = \n\
             ti.roomsDown = \n\
             ti.tilemap = \n",
            APPLICATION_NAME, BUILD_VERSION
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rows_keep_index_order() {
        let text = CppCodeGenerator::new()
            .generate(&[TileArea::new(2, 2, vec![1, 2, 3, 4])])
            .unwrap();
        let first = text.find("1,2},").unwrap();
        let second = text.find("3,4},").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_no_areas_still_has_headers() {
        let text = CppCodeGenerator::new().generate(&[]).unwrap();
        assert!(text.contains("ti.rooms = \n{\n};\n"));
        assert!(text.ends_with("ti.tilemap = \n"));
    }

    #[test]
    fn test_mismatch_writes_nothing() {
        let mut out = String::new();
        let err = CppCodeGenerator::new()
            .generate_rooms(&mut out, &[TileArea::new(3, 2, vec![1, 2, 3, 4])])
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::TileCountMismatch { area: 0, expected: 6, actual: 4 }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_room_links() {
        let rooms = [
            Room::new(0, 0, 32, 32),
            Room::new(32, 0, 32, 32),
            Room::new(0, 32, 32, 32),
            Room::new(32, 32, 32, 32),
        ];
        let mut out = String::new();
        CppCodeGenerator::new()
            .generate_room_links(&mut out, &link_rooms(&rooms, 0))
            .unwrap();

        assert_eq!(
            out,
            "ti.links = \n{\n\
             \t{{0,0},{-1,-1},{-1,-1}},\n\
             \t{{32,0},{-1,-1},{0,0}},\n\
             \t{{0,32},{0,0},{-1,-1}},\n\
             \t{{32,32},{32,0},{0,32}},\n\
             };\n"
        );
    }
}

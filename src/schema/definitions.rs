use super::{FieldKind, FieldSpec, Reference, ResourceSchema};

pub const EXHIBITION_REF: Reference = Reference {
    table: "exhibitions",
    column: "Exhibition_ID",
    label: "Exhibition",
};

pub const SPECIAL_EXHIBITION_REF: Reference = Reference {
    table: "special_exhibitions",
    column: "Special_Exhibition_ID",
    label: "Special exhibition",
};

pub const ARTWORK_REF: Reference = Reference {
    table: "artworks",
    column: "Artwork_ID",
    label: "Artwork",
};

pub const STAFF_REF: Reference = Reference {
    table: "employees",
    column: "Staff_ID",
    label: "Staff member",
};

pub const ARTWORK: ResourceSchema = ResourceSchema {
    name: "artwork",
    table: "artworks",
    key_column: "Artwork_ID",
    fields: &[
        FieldSpec::required("artworkID", "Artwork_ID", FieldKind::Identifier),
        FieldSpec::required("title", "Title", FieldKind::Text),
        FieldSpec::required("artistName", "Artist_Name", FieldKind::Text),
        FieldSpec::required("yearCreated", "Year_Created", FieldKind::Integer),
        FieldSpec::required("medium", "Medium", FieldKind::Text),
        FieldSpec::required("yearAcquired", "Year_Acquired", FieldKind::Integer),
        FieldSpec::optional("provenance", "Provenance", FieldKind::Text),
        FieldSpec::required("location", "Location", FieldKind::Text),
        FieldSpec::required("artCollectionType", "ArtCollection_Type", FieldKind::Text),
    ],
};

pub const EXHIBITION: ResourceSchema = ResourceSchema {
    name: "exhibition",
    table: "exhibitions",
    key_column: "Exhibition_ID",
    fields: &[
        FieldSpec::required("exhibitionID", "Exhibition_ID", FieldKind::Identifier),
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("startDate", "Start_Date", FieldKind::Date),
        FieldSpec::required("endDate", "End_Date", FieldKind::Date),
        FieldSpec::required("budget", "Budget", FieldKind::Decimal),
        FieldSpec::required("location", "Location", FieldKind::Text),
        FieldSpec::required("numTicketsSold", "Num_Tickets_Sold", FieldKind::Integer),
        FieldSpec::required("themes", "Themes", FieldKind::Text),
        FieldSpec::required("numArtworks", "Num_Of_Artworks", FieldKind::Integer),
    ],
};

pub const SPECIAL_EXHIBITION: ResourceSchema = ResourceSchema {
    name: "special exhibition",
    table: "special_exhibitions",
    key_column: "Special_Exhibition_ID",
    fields: &[
        FieldSpec::required(
            "specialExhibitionID",
            "Special_Exhibition_ID",
            FieldKind::Identifier,
        ),
        FieldSpec::required("Name", "Name", FieldKind::Text).aliases(&["name"]),
        FieldSpec::required("startDate", "Start_Date", FieldKind::Date),
        FieldSpec::required("endDate", "End_Date", FieldKind::Date),
        FieldSpec::required("budget", "Budget", FieldKind::Decimal),
        FieldSpec::required("location", "Location", FieldKind::Text),
    ],
};

pub const EXHIBITION_ARTWORK: ResourceSchema = ResourceSchema {
    name: "exhibition artwork",
    table: "exhibitions_artworks",
    key_column: "Link_ID",
    fields: &[
        FieldSpec::required("exhibitionID", "Exhibition_ID", FieldKind::Identifier)
            .references(EXHIBITION_REF),
        FieldSpec::required("artworkID", "Artwork_ID", FieldKind::Identifier)
            .references(ARTWORK_REF),
    ],
};

pub const EXHIBITION_STAFF: ResourceSchema = ResourceSchema {
    name: "exhibition staff",
    table: "exhibition_staff",
    key_column: "Link_ID",
    fields: &[
        FieldSpec::required("exhibitionID", "Exhibition_ID", FieldKind::Identifier)
            .references(EXHIBITION_REF),
        FieldSpec::required("staffID", "Staff_ID", FieldKind::Identifier).references(STAFF_REF),
    ],
};

pub const SPECIAL_EXHIBITION_STAFF: ResourceSchema = ResourceSchema {
    name: "special exhibition staff",
    table: "special_exhibition_staff",
    key_column: "Link_ID",
    fields: &[
        FieldSpec::required(
            "specialExhibitionID",
            "Special_Exhibition_ID",
            FieldKind::Identifier,
        )
        .references(SPECIAL_EXHIBITION_REF),
        FieldSpec::required("staffID", "Staff_ID", FieldKind::Identifier).references(STAFF_REF),
    ],
};

/// Staff accounts. `password` is validated here and swapped for its hash
/// before the insert.
pub const EMPLOYEE: ResourceSchema = ResourceSchema {
    name: "employee",
    table: "employees",
    key_column: "Staff_ID",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("email", "Email", FieldKind::Text),
        FieldSpec::required("role", "Role", FieldKind::Text),
        FieldSpec::required("password", "Password_Hash", FieldKind::Text),
    ],
};

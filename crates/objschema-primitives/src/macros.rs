#[macro_export]
macro_rules! property_type_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Bool,
                "bool",
                Primitive,
                engine_code = 1,
                is_indexable = true,
                is_primary_key_eligible = false
            ),
            (
                Int,
                "int",
                Primitive,
                engine_code = 0,
                is_indexable = true,
                is_primary_key_eligible = true
            ),
            (
                Float,
                "float",
                Primitive,
                engine_code = 5,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Double,
                "double",
                Primitive,
                engine_code = 6,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Decimal128,
                "decimal128",
                Primitive,
                engine_code = 11,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                ObjectId,
                "objectId",
                Primitive,
                engine_code = 10,
                is_indexable = true,
                is_primary_key_eligible = true
            ),
            (
                String,
                "string",
                Primitive,
                engine_code = 2,
                is_indexable = true,
                is_primary_key_eligible = true
            ),
            (
                Data,
                "data",
                Primitive,
                engine_code = 3,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Date,
                "date",
                Primitive,
                engine_code = 4,
                is_indexable = true,
                is_primary_key_eligible = false
            ),
            (
                Mixed,
                "mixed",
                Primitive,
                engine_code = 9,
                is_indexable = true,
                is_primary_key_eligible = false
            ),
            (
                Uuid,
                "uuid",
                Primitive,
                engine_code = 12,
                is_indexable = true,
                is_primary_key_eligible = true
            ),
            (
                List,
                "list",
                Collection,
                engine_code = 128,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Set,
                "set",
                Collection,
                engine_code = 256,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Dictionary,
                "dictionary",
                Collection,
                engine_code = 512,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                Object,
                "object",
                Relationship,
                engine_code = 7,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
            (
                LinkingObjects,
                "linkingObjects",
                Relationship,
                engine_code = 8,
                is_indexable = false,
                is_primary_key_eligible = false
            ),
        }
    };
}

macro_rules! property_type_registry {
    ($macro:ident) => {
        $crate::property_type_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::property_type_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($variant:ident, $name:literal, $category:ident, engine_code = $engine_code:expr, is_indexable = $is_indexable:expr, is_primary_key_eligible = $is_primary_key_eligible:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::PropertyTypeName::$variant => $crate::PropertyTypeMetadata {
                    name: $name,
                    category: $crate::PropertyCategory::$category,
                    engine_code: $engine_code,
                    is_indexable: $is_indexable,
                    is_primary_key_eligible: $is_primary_key_eligible,
                },
            )*
        }
    };
}

macro_rules! lookup_from_registry {
    ( @args $name:expr; @entries $( ($variant:ident, $literal:literal, $category:ident, engine_code = $engine_code:expr, is_indexable = $is_indexable:expr, is_primary_key_eligible = $is_primary_key_eligible:expr) ),* $(,)? ) => {
        match $name {
            $(
                $literal => Some($crate::PropertyTypeName::$variant),
            )*
            _ => None,
        }
    };
}

macro_rules! all_types_from_registry {
    ( @entries $( ($variant:ident, $name:literal, $category:ident, engine_code = $engine_code:expr, is_indexable = $is_indexable:expr, is_primary_key_eligible = $is_primary_key_eligible:expr) ),* $(,)? ) => {
        [ $( $crate::PropertyTypeName::$variant ),* ]
    };
}

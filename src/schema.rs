table! {
    appointments (id) {
        id -> Unsigned<Bigint>,
        client_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        services -> Varchar,
        preferred_date -> Date,
        preferred_time -> Time,
        duration_minutes -> Integer,
        staff_id -> Nullable<Unsigned<Bigint>>,
        status -> Varchar,
        notes -> Varchar,
        created_at -> Datetime,
    }
}

table! {
    blackouts (id) {
        id -> Unsigned<Bigint>,
        block_date -> Date,
        block_time -> Nullable<Time>,
        end_time -> Nullable<Time>,
        staff_id -> Nullable<Unsigned<Bigint>>,
        reason -> Varchar,
    }
}

table! {
    services (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        duration_minutes -> Integer,
        price -> Double,
        is_active -> Bool,
    }
}

table! {
    staff (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        is_active -> Bool,
    }
}

allow_tables_to_appear_in_same_query!(appointments, blackouts, services, staff,);

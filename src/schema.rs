// Database schema definitions
diesel::table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamp,
    }
}

diesel::table! {
    roles (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    user_roles (user_id, role_id) {
        user_id -> Int4,
        role_id -> Int4,
    }
}

diesel::table! {
    mentors (user_id) {
        user_id -> Int4,
        specialization -> Varchar,
    }
}

diesel::table! {
    students (user_id) {
        user_id -> Int4,
        major -> Varchar,
    }
}

diesel::table! {
    mentees (user_id) {
        user_id -> Int4,
        interests -> Varchar,
    }
}

diesel::table! {
    sessions (id) {
        id -> Int4,
        mentor_id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        sap_module -> Varchar,
        start_time -> Timestamp,
        end_time -> Timestamp,
        price -> Numeric,
        duration_minutes -> Nullable<Int4>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    bookings (id) {
        id -> Int4,
        session_id -> Int4,
        student_id -> Int4,
        status -> Varchar,
        payment_status -> Varchar,
        created_at -> Timestamp,
    }
}

diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(user_roles -> roles (role_id));
diesel::joinable!(mentors -> users (user_id));
diesel::joinable!(students -> users (user_id));
diesel::joinable!(mentees -> users (user_id));
diesel::joinable!(sessions -> users (mentor_id));
diesel::joinable!(bookings -> sessions (session_id));

diesel::allow_tables_to_appear_in_same_query!(
    users, roles, user_roles, mentors,
    students, mentees, sessions, bookings,
);

//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates around a shared layout. Every
//! interpolated value goes through `escape`.

use crate::domain::{Property, SearchCriteria, User};

/// Escape text for HTML element and attribute content.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Real Estate</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        body = body
    )
}

fn price_text(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{:.2}", p))
}

fn price_value(price: Option<f64>) -> String {
    price.map_or_else(String::new, |p| p.to_string())
}

pub fn home_page() -> String {
    layout(
        "Home",
        r#"<h1>Find your next home</h1>
<p>Browse approved listings or publish your own property.</p>
<p><a href="/login">Login</a> | <a href="/register">Register</a></p>"#,
    )
}

pub fn login_page(failed: bool, logged_out: bool) -> String {
    let notice = if failed {
        r#"<p class="alert error">Invalid email or password.</p>"#
    } else if logged_out {
        r#"<p class="alert info">You have been logged out.</p>"#
    } else {
        ""
    };

    layout(
        "Login",
        &format!(
            r#"<h1>Login</h1>
{notice}
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#
        ),
    )
}

pub fn register_page(error: Option<&str>) -> String {
    let notice = error
        .map(|msg| format!(r#"<p class="alert error">{}</p>"#, escape(msg)))
        .unwrap_or_default();

    layout(
        "Register",
        &format!(
            r#"<h1>Create an account</h1>
{notice}
<form method="post" action="/register">
<label>Full name <input type="text" name="fullName" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirmPassword"></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Login</a></p>"#
        ),
    )
}

pub fn dashboard_page(email: &str) -> String {
    layout(
        "Dashboard",
        &format!(
            r#"<h1>Welcome, {email}</h1>
<ul>
<li><a href="/properties/list">Browse properties</a></li>
<li><a href="/properties/search">Search</a></li>
<li><a href="/properties/add">Add a property</a></li>
<li><a href="/logout">Logout</a></li>
</ul>"#,
            email = escape(email)
        ),
    )
}

pub fn admin_dashboard_page(email: &str, user_count: u64, property_count: u64) -> String {
    layout(
        "Admin Dashboard",
        &format!(
            r#"<h1>Admin dashboard</h1>
<p>Signed in as {email}</p>
<section class="stats">
<div><strong>{user_count}</strong> users</div>
<div><strong>{property_count}</strong> properties</div>
</section>
<ul>
<li><a href="/admin/users">Manage users</a></li>
<li><a href="/admin/properties">Moderate properties</a></li>
<li><a href="/logout">Logout</a></li>
</ul>"#,
            email = escape(email)
        ),
    )
}

pub fn admin_users_page(users: &[User]) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                r#"<tr><td>{name}</td><td>{email}</td><td>{role}</td>
<td><a href="/admin/users/edit/{id}">Edit</a>
<form method="post" action="/admin/users/delete/{id}" class="inline"><button type="submit">Delete</button></form></td></tr>
"#,
                name = escape(&user.full_name),
                email = escape(&user.email),
                role = user.role,
                id = user.id
            )
        })
        .collect();

    layout(
        "Users",
        &format!(
            r#"<h1>Users</h1>
<table>
<thead><tr><th>Name</th><th>Email</th><th>Role</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<p><a href="/admin/dashboard">Back to dashboard</a></p>"#
        ),
    )
}

pub fn edit_user_page(user: &User) -> String {
    let selected = |admin: bool| if user.is_admin() == admin { " selected" } else { "" };

    layout(
        "Edit User",
        &format!(
            r#"<h1>Edit user</h1>
<form method="post" action="/admin/users/update">
<input type="hidden" name="id" value="{id}">
<label>Full name <input type="text" name="fullName" value="{name}" required></label>
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Role
<select name="role">
<option value="ROLE_CUSTOMER"{customer}>Customer</option>
<option value="ROLE_ADMIN"{admin}>Admin</option>
</select></label>
<label>New password <input type="password" name="password" placeholder="Leave blank to keep"></label>
<button type="submit">Save</button>
</form>"#,
            id = user.id,
            name = escape(&user.full_name),
            email = escape(&user.email),
            customer = selected(false),
            admin = selected(true)
        ),
    )
}

pub fn admin_properties_page(properties: &[Property]) -> String {
    let rows: String = properties
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{title}</td><td>{location}</td><td>{price}</td><td>{status}</td><td>{owner}</td>
<td><a href="/admin/properties/approve/{id}">Approve</a>
<a href="/admin/properties/reject/{id}">Reject</a>
<a href="/admin/properties/delete/{id}">Delete</a></td></tr>
"#,
                title = escape(&p.title),
                location = escape(&p.location),
                price = price_text(p.price),
                status = p.status,
                owner = escape(&p.owner_or_placeholder().email),
                id = p.id
            )
        })
        .collect();

    layout(
        "Properties",
        &format!(
            r#"<h1>Property moderation</h1>
<table>
<thead><tr><th>Title</th><th>Location</th><th>Price</th><th>Status</th><th>Owner</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<p><a href="/admin/dashboard">Back to dashboard</a></p>"#
        ),
    )
}

fn search_form(criteria: &SearchCriteria) -> String {
    format!(
        r#"<form method="get" action="/properties/list" class="search">
<input type="text" name="location" placeholder="Location" value="{location}">
<input type="number" step="any" name="price" placeholder="Max price" value="{price}">
<input type="text" name="type" placeholder="Sale / Rent" value="{kind}">
<button type="submit">Search</button>
</form>"#,
        location = escape(criteria.location.as_deref().unwrap_or_default()),
        price = price_value(criteria.max_price),
        kind = escape(criteria.property_type.as_deref().unwrap_or_default())
    )
}

pub fn property_list_page(properties: &[Property], criteria: &SearchCriteria) -> String {
    let cards: String = if properties.is_empty() {
        "<p>No properties found.</p>".to_string()
    } else {
        properties
            .iter()
            .map(|p| {
                let image = p
                    .image_url
                    .as_deref()
                    .map(|url| format!(r#"<img src="{}" alt="">"#, escape(url)))
                    .unwrap_or_default();
                format!(
                    r#"<article class="card status-{status_class}">
{image}
<h2><a href="/properties/view/{id}">{title}</a></h2>
<p>{location} | {kind} | {price}</p>
<p class="status">{status}</p>
<a href="/properties/edit/{id}">Edit</a>
</article>
"#,
                    status_class = p.status.as_str().to_lowercase(),
                    id = p.id,
                    title = escape(&p.title),
                    location = escape(&p.location),
                    kind = escape(&p.property_type),
                    price = price_text(p.price),
                    status = p.status
                )
            })
            .collect()
    };

    layout(
        "Properties",
        &format!(
            r#"<h1>Properties</h1>
{form}
<section class="cards">
{cards}</section>
<p><a href="/properties/add">Add a property</a></p>"#,
            form = search_form(criteria)
        ),
    )
}

pub fn search_page() -> String {
    layout(
        "Search",
        &format!(
            "<h1>Search properties</h1>\n{}",
            search_form(&SearchCriteria::default())
        ),
    )
}

/// Listing form. `None` renders an empty submission form; `Some` renders
/// the edit form, including the owner contact fields.
pub fn property_form_page(existing: Option<&Property>) -> String {
    let (heading, action) = match existing {
        Some(_) => ("Edit property", "/properties/update"),
        None => ("Add property", "/properties/save"),
    };

    let hidden_id = existing
        .map(|p| format!(r#"<input type="hidden" name="id" value="{}">"#, p.id))
        .unwrap_or_default();

    let owner_fields = existing
        .map(|p| {
            let owner = p.owner_or_placeholder();
            format!(
                r#"<fieldset><legend>Owner</legend>
<label>Full name <input type="text" name="ownerFullName" value="{name}"></label>
<label>Email <input type="email" name="ownerEmail" value="{email}"></label>
</fieldset>"#,
                name = escape(&owner.full_name),
                email = escape(&owner.email)
            )
        })
        .unwrap_or_default();

    let field = |f: fn(&Property) -> String| existing.map(f).unwrap_or_default();

    layout(
        heading,
        &format!(
            r#"<h1>{heading}</h1>
<form method="post" action="{action}" enctype="multipart/form-data">
{hidden_id}
<label>Title <input type="text" name="title" value="{title}" required></label>
<label>Description <textarea name="description">{description}</textarea></label>
<label>Price <input type="number" step="any" name="price" value="{price}"></label>
<label>Type <input type="text" name="type" value="{kind}" placeholder="Sale / Rent"></label>
<label>Location <input type="text" name="location" value="{location}"></label>
{owner_fields}
<label>Image <input type="file" name="imageFile" accept="image/*"></label>
<button type="submit">Save</button>
</form>"#,
            title = field(|p| escape(&p.title)),
            description = field(|p| escape(&p.description)),
            price = existing.map(|p| price_value(p.price)).unwrap_or_default(),
            kind = field(|p| escape(&p.property_type)),
            location = field(|p| escape(&p.location)),
        ),
    )
}

pub fn view_property_page(property: &Property) -> String {
    let owner = property.owner_or_placeholder();
    let image = property
        .image_url
        .as_deref()
        .map(|url| format!(r#"<img src="{}" alt="" class="hero">"#, escape(url)))
        .unwrap_or_default();

    layout(
        &property.title,
        &format!(
            r#"<h1>{title}</h1>
{image}
<p>{description}</p>
<dl>
<dt>Price</dt><dd>{price}</dd>
<dt>Type</dt><dd>{kind}</dd>
<dt>Location</dt><dd>{location}</dd>
<dt>Status</dt><dd>{status}</dd>
<dt>Listed</dt><dd>{created}</dd>
<dt>Owner</dt><dd>{owner_name} ({owner_email})</dd>
</dl>
<p><a href="/properties/edit/{id}">Edit</a> | <a href="/properties/list">Back</a></p>"#,
            title = escape(&property.title),
            description = escape(&property.description),
            price = price_text(property.price),
            kind = escape(&property.property_type),
            location = escape(&property.location),
            status = property.status,
            created = property.created_at.format("%Y-%m-%d %H:%M"),
            owner_name = escape(&owner.full_name),
            owner_email = escape(&owner.email),
            id = property.id
        ),
    )
}

pub fn error_page(status: u16, title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            r#"<h1>{status} - {title}</h1>
<p>{message}</p>
<p><a href="/">Home</a></p>"#,
            title = escape(title),
            message = escape(message)
        ),
    )
}

/// Rows as the remote project table returns them, including the shapes the
/// client has to repair: a plain string title, a partially translated
/// description and a missing technologies column.
pub fn project_rows_fixture() -> &'static str {
    return r#"
[
  {
    "id": "6c0a4a59-0d55-4b8e-9d0e-0b8b7c2b5f01",
    "title": { "ru": "Магазин", "en": "Storefront", "uz": "Do'kon" },
    "description": { "ru": "Интернет-магазин", "en": "Online store", "uz": "Onlayn do'kon" },
    "technologies": ["React", "TypeScript", "Supabase"],
    "image_url": "https://cdn.example.com/storefront.png",
    "website_url": "https://storefront.example.com",
    "github_url": "https://github.com/example/storefront",
    "featured": true,
    "created_at": "2024-03-02T10:00:00.000000+00:00",
    "updated_at": "2024-03-02T10:00:00.000000+00:00"
  },
  {
    "id": "0f4b7f3e-8a7c-4ad2-a1a3-52b5f1e0c702",
    "title": "Landing page",
    "description": { "en": "Marketing landing page" },
    "technologies": null,
    "image_url": "/placeholder.svg",
    "website_url": "https://landing.example.com",
    "github_url": null,
    "featured": false,
    "created_at": "2024-03-01T09:30:00+00:00",
    "updated_at": "2024-03-01T09:30:00+00:00"
  }
]
"#
    .trim();
}

//! Static reference vocabulary of dish and term names.
//!
//! Suggestion candidates of last resort: consulted after in-scope record
//! titles, tags and ingredients, and again by the prefix-overlap widening pass.

/// Known dish names, grouped loosely by cuisine.
pub const REFERENCE_VOCABULARY: &[&str] = &[
    // Indian Dishes
    "Matar Paneer", "Butter Chicken", "Chicken Biryani", "Vegetable Biryani", "Dal Makhani",
    "Palak Paneer", "Chicken Tikka Masala", "Aloo Gobi", "Rajma", "Chole Bhature", "Samosa",
    "Dosa", "Idli", "Vada Pav", "Pav Bhaji", "Tandoori Chicken",
    // Indo-Chinese
    "Vegetable Manchurian", "Chicken Manchurian", "Hakka Noodles", "Fried Rice",
    "Chili Chicken", "Gobi Manchurian", "Spring Rolls", "Momos",
    // Italian
    "Pasta Carbonara", "Margherita Pizza", "Lasagna", "Risotto", "Spaghetti Bolognese",
    "Fettuccine Alfredo", "Penne Arrabbiata", "Tiramisu", "Bruschetta",
    // Chinese
    "Sweet and Sour Chicken", "Kung Pao Chicken", "Mapo Tofu", "Peking Duck", "Hot Pot",
    "Dim Sum", "Chow Mein", "General Tso Chicken",
    // Thai
    "Pad Thai", "Green Curry", "Tom Yum Soup", "Massaman Curry", "Som Tam",
    "Thai Basil Chicken", "Mango Sticky Rice",
    // Mexican
    "Tacos", "Burritos", "Quesadillas", "Enchiladas", "Guacamole", "Nachos", "Fajitas",
    "Churros", "Tres Leches Cake",
    // American
    "Hamburger", "Hot Dog", "Mac and Cheese", "BBQ Ribs", "Fried Chicken", "Caesar Salad",
    "Clam Chowder", "Apple Pie", "Cheesecake",
    // Japanese
    "Sushi", "Ramen", "Tempura", "Teriyaki Chicken", "Miso Soup", "Yakitori", "Udon",
    "Katsu Curry", "Mochi",
    // Mediterranean
    "Greek Salad", "Hummus", "Falafel", "Shawarma", "Baklava", "Moussaka", "Tzatziki", "Dolmas",
    "Spanakopita",
    // French
    "Croissant", "French Toast", "Coq au Vin", "Ratatouille", "Crème Brûlée", "Bouillabaisse",
    "Quiche Lorraine", "Macarons",
    // Desserts
    "Chocolate Cake", "Ice Cream", "Cookies", "Brownies", "Donuts", "Pancakes", "Waffles",
    "Milkshake", "Smoothie", "Fruit Salad",
    // Breads & Rice
    "Naan", "Roti", "Chapati", "Aloo Paratha", "Paneer Paratha", "Methi Paratha", "Puri",
    "Mutton Biryani", "Veg Biryani", "Hyderabadi Biryani", "Thalassery Biryani", "Jeera Rice",
    "Veg Pulao", "Peas Pulao", "Chicken Pulao",
    // Vegetarian Dishes
    "Paneer Butter Masala", "Chole", "Chickpea Curry", "Kidney Bean Curry", "Baingan Bharta",
    "Bhindi Masala", "Mix Veg Curry", "Dum Aloo",
    // Non-Vegetarian Dishes
    "Rogan Josh", "Goan Fish Curry", "Bengali Fish Curry", "Egg Curry", "Chicken Korma",
    "Chicken Chettinad", "Andhra Chicken Curry", "Kodi Kura", "Kerala Chicken Curry",
    // Snacks & Street Food
    "Dhokla", "Onion Pakora", "Potato Pakora", "Paneer Pakora", "Aloo Tikki", "Bhel Chaat",
    "Dahi Puri", "Pani Puri", "Medu Vada", "Banana Chips", "Murukku", "Chakli", "Sundal",
    "Punugulu",
    // South Indian Dishes & Breads
    "Plain Dosa", "Masala Dosa", "Rava Dosa", "Set Dosa", "Paper Dosa", "Mysore Masala Dosa",
    "Neer Dosa", "Pesarattu", "Uttapam", "Appam", "Pathiri", "Malabar Parotta",
    // Regional Specialties
    "Sambar", "Rasam", "Kootu", "Puli Kuzhambu", "Vatha Kuzhambu", "Lemon Rice",
    "Tamarind Rice", "Puliyodarai", "Avial", "Kerala Sadya", "Erissery", "Bisi Bele Bath",
    "Ragi Mudde", "Vangi Bath", "Gongura Pachadi", "Pulihora",
    // Indian Sweets
    "Gulab Jamun", "Rasgulla", "Jalebi", "Kheer", "Besan Ladoo", "Boondi Ladoo", "Kaju Barfi",
    "Coconut Barfi", "Milk Barfi", "Rasmalai", "Sooji Halwa", "Gajar Halwa", "Payasam",
    "Mysore Pak", "Unniyappam", "Kesari Bath", "Bobbatlu", "Obbattu", "Poli",
    // Popular International
    "Pizza", "Pasta", "Burger", "Sandwich", "Curry", "Noodles",
];
